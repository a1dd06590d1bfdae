//! Rendering of check states and the proceed-to-link hand-off.

use anyhow::{Context, Result};
use std::process::Command;

use crate::config::Presentation;
use crate::session::{CheckFailure, CheckState};
use crate::verdict::Verdict;

pub const NO_URL_MESSAGE: &str = "No URL provided.";
pub const CHECKING_MESSAGE: &str = "Checking URL...";
pub const GENUINE_MESSAGE: &str = "This URL is genuine.";
pub const MALICIOUS_MESSAGE: &str = "Warning! This URL may be malicious.";
pub const ERROR_MESSAGE: &str = "Error checking URL.";

/// What to do with the link once a state has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedAction {
    /// Ask the user whether to open the link.
    Prompt,
    /// Open the link without asking.
    OpenNow,
    /// Go back; the link is not offered.
    Stay,
}

pub fn status_line(state: &CheckState) -> &'static str {
    match state {
        CheckState::Idle => NO_URL_MESSAGE,
        CheckState::Checking { .. } => CHECKING_MESSAGE,
        CheckState::Genuine(_) => GENUINE_MESSAGE,
        CheckState::Malicious(_) => MALICIOUS_MESSAGE,
        CheckState::Error(_) => ERROR_MESSAGE,
    }
}

/// Status line, then score and detail block when a verdict exists.
pub fn render(state: &CheckState) -> String {
    let mut out = String::from(status_line(state));
    if let Some(v) = state.verdict() {
        out.push('\n');
        out.push_str(&format!("Risk Score: {}\n", v.risk_score));
        out.push_str(&details(v));
    }
    out
}

fn details(v: &Verdict) -> String {
    format!(
        "Domain: {}\nUnsafe: {}\nSuspicious: {}\nPhishing: {}\nMalware: {}\nSpamming: {}\nAdult: {}",
        v.display_domain, v.r#unsafe, v.suspicious, v.phishing, v.malware, v.spamming, v.adult
    )
}

/// Manual mode offers the link after any finished check; auto-redirect opens
/// genuine links straight away and offers nothing otherwise. Input that was
/// never a URL is not offered in either mode.
pub fn proceed_action(mode: Presentation, state: &CheckState) -> ProceedAction {
    if !state.is_terminal() || matches!(state, CheckState::Error(CheckFailure::InvalidQuery(_))) {
        return ProceedAction::Stay;
    }
    match mode {
        Presentation::Manual => ProceedAction::Prompt,
        Presentation::AutoRedirect => match state {
            CheckState::Genuine(_) => ProceedAction::OpenNow,
            _ => ProceedAction::Stay,
        },
    }
}

/// Split the configured browser command into program and leading arguments.
fn browser_command(browser: &str, url: &str) -> Result<Command> {
    let mut parts = browser.split_whitespace();
    let program = parts.next().context("browser command is empty")?;
    let mut cmd = Command::new(program);
    cmd.args(parts).arg(url);
    Ok(cmd)
}

/// Hand the URL to the external browser. Does not wait for it to exit.
pub fn open_in_browser(browser: &str, url: &str) -> Result<()> {
    let mut cmd = browser_command(browser, url)?;
    tracing::info!("opening link with {}", browser);
    cmd.spawn().with_context(|| format!("launch browser `{}`", browser))?;
    Ok(())
}
