//! Live OpenAI API tests. Run with `--features api` and `OPENAI_API_KEY` set.

mod test_utils;

use bedtime_interface::BedtimeDriver;
use bedtime_models::OpenAIClient;
use test_utils::create_test_request;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_basic_generation() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = OpenAIClient::from_env("gpt-3.5-turbo")?;
    let request = create_test_request("Say hello in five words.", None, Some(20), Some(0.2));

    let response = client.generate(&request).await?;

    assert!(!response.outputs().is_empty(), "Should receive non-empty response");
    assert!(response.text().is_some());
    println!("Response: {:?}", response.outputs());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_reports_usage() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = OpenAIClient::from_env("gpt-3.5-turbo")?;
    let request = create_test_request("Reply with one word.", None, Some(5), None);

    let response = client.generate(&request).await?;
    let usage = response.usage().as_ref().expect("OpenAI reports token usage");
    assert!(usage.prompt_tokens > 0);
    Ok(())
}
