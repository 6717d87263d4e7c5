//! Pre-chat survey and post-chat evaluation prompts.

use anyhow::Result;
use tokio::io::{AsyncBufRead, Lines};

use support_chat::application::EvaluationFlow;
use support_chat::domain::evaluation::EvaluationForm;
use support_chat::domain::survey::{SurveyForm, SurveyResponse};

async fn ask<R>(lines: &mut Lines<R>, prompt: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    println!("{prompt}");
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

/// Asks for a category and an optional name until the answers are valid.
/// Returns `None` if input ends first.
pub async fn survey<R>(form: &SurveyForm, lines: &mut Lines<R>) -> Result<Option<SurveyResponse>>
where
    R: AsyncBufRead + Unpin,
{
    println!("ご利用前にアンケートにご協力ください。");
    for (i, category) in form.categories().iter().enumerate() {
        println!("  [{}] {category}", i + 1);
    }

    loop {
        let Some(answer) = ask(lines, "お問い合わせ種別（番号）:").await? else {
            return Ok(None);
        };
        let category = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| form.categories().get(i).cloned());
        let Some(name) = ask(lines, "お名前（任意）:").await? else {
            return Ok(None);
        };

        match form.complete(category.as_deref(), Some(&name)) {
            Ok(response) => return Ok(Some(response)),
            Err(error) => println!("{error}"),
        }
    }
}

/// Runs the evaluation modal. A blank first answer skips it.
pub async fn evaluation<R>(mut flow: EvaluationFlow, lines: &mut Lines<R>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    flow.open()?;
    println!("チャットの評価にご協力ください（空欄でスキップ）。");

    let helpful = match ask(lines, "お役に立ちましたか？ (y/n):").await?.as_deref() {
        None | Some("") => {
            flow.skip()?;
            return Ok(());
        }
        Some(answer) => parse_helpful(answer),
    };
    let rating = ask(lines, "満足度 (1-5、0 でなし):")
        .await?
        .and_then(|answer| answer.parse::<u8>().ok())
        .unwrap_or(0);
    let feedback = ask(lines, "ご意見（任意）:").await?.unwrap_or_default();

    let form = match EvaluationForm::from_inputs(helpful, rating, &feedback) {
        Ok(form) => form,
        Err(error) => {
            println!("{error}");
            EvaluationForm::from_inputs(helpful, 0, "")?
        }
    };
    flow.submit(form).await?;
    println!("ご協力ありがとうございました。");
    Ok(())
}

fn parse_helpful(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" | "はい" => Some(true),
        "n" | "no" | "いいえ" => Some(false),
        _ => None,
    }
}
