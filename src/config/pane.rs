//! Preset widget configurations for the side-by-side demo page

use super::{AppConfig, FeatureFlags};
use crate::domain::dialogue::InteractionMode;
use crate::domain::survey::SurveyResponse;

pub const SELECTION_TITLE: &str = "選択型（人が選択）";
pub const SELECTION_GREETING: &str =
    "お問い合わせありがとうございます。お知りになりたい内容を選択してください。";

pub const CONVERSATION_TITLE: &str = "会話型（AIがナビゲート）";
pub const CONVERSATION_GREETING: &str = "お知りになりたい内容を入力してください。";
pub const STANDALONE_TITLE: &str = "チャットサポート";
pub const LINE_GREETING: &str = "LINEからのお問い合わせありがとうございます。\nこちらでより詳しいご案内をいたします。お知りになりたい内容を入力してください。";

/// Which preset a widget is mounted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Menu only, every optional feature off
    Selection,
    /// Free text only, every optional feature on
    Conversation,
    /// Configuration as loaded
    #[default]
    Hybrid,
}

impl AppConfig {
    /// Defaults with the selection preset applied.
    pub fn selection_pane() -> Self {
        Self::default().with_pane(Pane::Selection)
    }

    /// Defaults with the conversation preset for the given entry channel.
    pub fn conversation_pane(source: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.widget.source = source.into();
        config.with_pane(Pane::Conversation)
    }

    /// Standalone chat opened after the pre-chat survey: conversation mode,
    /// greeting built from the answers, no initial options.
    pub fn after_survey(mut self, survey: &SurveyResponse) -> Self {
        self.widget.title = STANDALONE_TITLE.to_string();
        self.widget.initial_message = Some(survey.greeting());
        self.widget.initial_options = Some(Vec::new());
        self.widget.mode = InteractionMode::Conversation;
        self
    }

    /// Overrides the widget and feature sections with a pane preset.
    ///
    /// `widget.source` is kept; the conversation greeting depends on it.
    pub fn with_pane(mut self, pane: Pane) -> Self {
        match pane {
            Pane::Selection => {
                self.widget.title = SELECTION_TITLE.to_string();
                self.widget.initial_message = Some(SELECTION_GREETING.to_string());
                self.widget.initial_options = None;
                self.widget.mode = InteractionMode::Selection;
                self.features = FeatureFlags::none();
            }
            Pane::Conversation => {
                let greeting = if self.widget.is_line() {
                    LINE_GREETING
                } else {
                    CONVERSATION_GREETING
                };
                self.widget.title = CONVERSATION_TITLE.to_string();
                self.widget.initial_message = Some(greeting.to_string());
                self.widget.initial_options = Some(Vec::new());
                self.widget.mode = InteractionMode::Conversation;
                self.features = FeatureFlags::default();
            }
            Pane::Hybrid => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_pane_turns_features_off() {
        let config = AppConfig::selection_pane();
        assert_eq!(config.widget.mode, InteractionMode::Selection);
        assert_eq!(config.widget.title, SELECTION_TITLE);
        assert_eq!(config.features, FeatureFlags::none());
        assert!(config.widget.initial_options.is_none());
    }

    #[test]
    fn conversation_pane_has_no_initial_options() {
        let config = AppConfig::default().with_pane(Pane::Conversation);
        assert_eq!(config.widget.mode, InteractionMode::Conversation);
        assert_eq!(config.widget.initial_options, Some(Vec::new()));
        assert_eq!(config.widget.initial_message.as_deref(), Some(CONVERSATION_GREETING));
        assert!(config.features.enable_escalation);
    }

    #[test]
    fn conversation_pane_greets_line_users() {
        let config = AppConfig::conversation_pane("line");
        assert_eq!(config.widget.initial_message.as_deref(), Some(LINE_GREETING));
        assert_eq!(config.widget.source, "line");
    }

    #[test]
    fn after_survey_opens_a_conversation_with_the_survey_greeting() {
        let survey = SurveyResponse {
            category: "その他のご質問".into(),
            name: Some("山田".into()),
        };
        let config = AppConfig::default().after_survey(&survey);
        assert_eq!(config.widget.mode, InteractionMode::Conversation);
        assert_eq!(config.widget.title, STANDALONE_TITLE);
        assert_eq!(config.widget.initial_message, Some(survey.greeting()));
        assert_eq!(config.widget.initial_options, Some(Vec::new()));
        assert_eq!(config.features, FeatureFlags::default());
    }

    #[test]
    fn hybrid_pane_keeps_loaded_values() {
        let mut config = AppConfig::default();
        config.widget.title = "独自タイトル".to_string();
        let config = config.with_pane(Pane::Hybrid);
        assert_eq!(config.widget.title, "独自タイトル");
        assert_eq!(config.widget.mode, InteractionMode::Hybrid);
    }
}
