//! `phishguard check <url>` – look up a URL, show the verdict, offer to open it.

use anyhow::{Context, Result};
use phishguard_core::config::{PhishguardConfig, Presentation};
use phishguard_core::lookup::ApiClient;
use phishguard_core::present::{self, ProceedAction};
use phishguard_core::session::{CheckFailure, CheckSession, CheckState};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub const EXIT_OK: i32 = 0;
/// No URL, invalid URL, failed lookup, or service-reported failure.
pub const EXIT_CHECK_ERROR: i32 = 2;
/// Malicious verdict with `--strict`.
pub const EXIT_MALICIOUS: i32 = 3;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Overrides the configured presentation mode.
    pub presentation: Option<Presentation>,
    pub json: bool,
    pub strict: bool,
    pub assume_yes: bool,
}

pub async fn run_check(
    cfg: &PhishguardConfig,
    url: Option<&str>,
    opts: &CheckOptions,
) -> Result<i32> {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        println!("{}", present::NO_URL_MESSAGE);
        return Ok(EXIT_CHECK_ERROR);
    };

    let api_key = cfg.resolve_api_key()?;
    let client = Arc::new(ApiClient::from_config(cfg, api_key));
    let mut session = CheckSession::new(client);

    if matches!(session.submit(url), CheckState::Checking { .. }) && !opts.json {
        println!("{}", present::CHECKING_MESSAGE);
    }
    let state = session.settle().await.clone();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report(url, &state))?);
        return Ok(exit_code(&state, opts.strict));
    }

    println!("{}", present::render(&state));
    let mode = opts.presentation.unwrap_or(cfg.presentation);
    match present::proceed_action(mode, &state) {
        ProceedAction::OpenNow => present::open_in_browser(&cfg.browser, url)?,
        ProceedAction::Prompt => {
            if opts.assume_yes || confirm("Proceed to link? [y/N] ")? {
                present::open_in_browser(&cfg.browser, url)?;
            }
        }
        ProceedAction::Stay => {}
    }
    Ok(exit_code(&state, opts.strict))
}

fn exit_code(state: &CheckState, strict: bool) -> i32 {
    match state {
        CheckState::Genuine(_) => EXIT_OK,
        CheckState::Malicious(_) if strict => EXIT_MALICIOUS,
        CheckState::Malicious(_) => EXIT_OK,
        _ => EXIT_CHECK_ERROR,
    }
}

fn report(url: &str, state: &CheckState) -> Value {
    let error = match state {
        CheckState::Error(CheckFailure::InvalidQuery(m)) => Some(m.as_str()),
        CheckState::Error(CheckFailure::Lookup(reason)) => Some(reason.as_str()),
        CheckState::Error(CheckFailure::ApiReported { message }) => Some(message.as_str()),
        _ => None,
    };
    json!({
        "url": url,
        "state": state.as_str(),
        "status": present::status_line(state),
        "verdict": state.verdict(),
        "error": error,
    })
}

/// Reads one line from stdin; only "y"/"yes" count as consent. EOF means no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush().context("flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read answer")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::verdict::Verdict;

    fn verdict(is_genuine: bool) -> Verdict {
        Verdict {
            is_genuine,
            risk_score: 85,
            display_domain: "bad.example".to_string(),
            r#unsafe: !is_genuine,
            suspicious: false,
            phishing: !is_genuine,
            malware: false,
            spamming: false,
            adult: false,
        }
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(&CheckState::Genuine(verdict(true)), true), EXIT_OK);
        assert_eq!(exit_code(&CheckState::Malicious(verdict(false)), false), EXIT_OK);
        assert_eq!(
            exit_code(&CheckState::Malicious(verdict(false)), true),
            EXIT_MALICIOUS
        );
        let err = CheckState::Error(CheckFailure::Lookup("HTTP 500".to_string()));
        assert_eq!(exit_code(&err, false), EXIT_CHECK_ERROR);
    }

    #[test]
    fn json_report_for_verdict() {
        let r = report("https://bad.example", &CheckState::Malicious(verdict(false)));
        assert_eq!(r["state"], "malicious");
        assert_eq!(r["status"], present::MALICIOUS_MESSAGE);
        assert_eq!(r["verdict"]["risk_score"], 85);
        assert_eq!(r["verdict"]["phishing"], true);
        assert!(r["error"].is_null());
    }

    #[test]
    fn json_report_for_error_has_no_verdict() {
        let state = CheckState::Error(CheckFailure::ApiReported {
            message: "Invalid key.".to_string(),
        });
        let r = report("https://a.test", &state);
        assert_eq!(r["state"], "error");
        assert!(r["verdict"].is_null());
        assert_eq!(r["error"], "Invalid key.");
    }

    #[test]
    fn only_explicit_yes_consents() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n\n"));
        assert!(!is_yes("yep"));
    }

    #[tokio::test]
    async fn missing_url_reports_without_network() {
        let cfg = PhishguardConfig::default();
        let code = run_check(&cfg, None, &CheckOptions::default()).await.unwrap();
        assert_eq!(code, EXIT_CHECK_ERROR);
        let code = run_check(&cfg, Some("  "), &CheckOptions::default())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CHECK_ERROR);
    }
}
