//! Wallet-Embed scripted harness — entry point.
//!
//! Wires a [`WalletEmbed`] orchestrator to a scripted fake embedded document
//! over the in-memory loopback transport and logs every observable effect:
//! state transitions, trigger updates, and callback invocations.  Useful for
//! exercising the protocol end-to-end without a browser, and as a living
//! demo of the embedding application's integration surface.
//!
//! # Usage
//!
//! ```text
//! wembed-harness [OPTIONS]
//!
//! Options:
//!   --scenario <NAME>       Scenario to run: signin | auto-open | suppression
//!                           [default: signin]
//!   --pending <N>           Pending-request count used by the scripted wallet
//!                           [default: 2]
//!   --step-delay-ms <MS>    Pause between scripted steps [default: 150]
//! ```
//!
//! Log verbosity is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).
//!
//! # Scenarios
//!
//! - `signin` — first paint, sign-out, sign-in, balance report, footprint
//!   change.  The embed never opens; everything lands on the trigger.
//! - `auto-open` — a pending request arrives and the wallet navigates to
//!   its request screen, auto-opening the surface.
//! - `suppression` — the user dismisses the surface while requests are
//!   pending; subsequent request screens must not reopen it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wembed_core::{BalanceInfo, RouteConfig, RouteKind};
use wembed_frame::{FrameAgent, HostPost, PostError};
use wembed_host::{
    ButtonOptions, EmbedCallbacks, EmbedOptions, FrameTransport, HostPage, LoopbackTransport,
    MockHostPage, WalletEmbed,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Wallet-Embed scripted protocol harness.
///
/// Runs a scripted embedded document against a real orchestrator over an
/// in-memory channel and logs every observable effect.
#[derive(Debug, Parser)]
#[command(
    name = "wembed-harness",
    about = "Scripted protocol exercise harness for Wallet-Embed",
    version
)]
struct Cli {
    /// Scenario to run: signin, auto-open, or suppression.
    #[arg(long, default_value = "signin", env = "WEMBED_SCENARIO")]
    scenario: String,

    /// Pending-request count the scripted wallet reports.
    #[arg(long, default_value_t = 2, env = "WEMBED_PENDING")]
    pending: u64,

    /// Pause between scripted steps, in milliseconds.
    #[arg(long, default_value_t = 150, env = "WEMBED_STEP_DELAY_MS")]
    step_delay_ms: u64,
}

/// The scripted flows the harness can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Signin,
    AutoOpen,
    Suppression,
}

impl Cli {
    fn parse_scenario(&self) -> anyhow::Result<Scenario> {
        match self.scenario.as_str() {
            "signin" => Ok(Scenario::Signin),
            "auto-open" => Ok(Scenario::AutoOpen),
            "suppression" => Ok(Scenario::Suppression),
            other => bail!("unknown scenario '{other}' (expected signin, auto-open, or suppression)"),
        }
    }
}

// ── Loopback wiring ───────────────────────────────────────────────────────────

/// Bridges the frame agent's outbound side onto the loopback channel.
struct FrameEndpoint {
    transport: Arc<LoopbackTransport>,
}

impl HostPost for FrameEndpoint {
    fn post(&self, envelope: Value) -> Result<(), PostError> {
        self.transport.emit_from_frame(envelope);
        Ok(())
    }
}

/// Callbacks that narrate every notification to the log.
fn narrating_callbacks() -> EmbedCallbacks {
    EmbedCallbacks {
        on_auth: Some(Box::new(|details| {
            info!(signed_in = details.is_some(), "callback: on_auth");
        })),
        on_open: Some(Box::new(|| info!("callback: on_open"))),
        on_close: Some(Box::new(|| info!("callback: on_close"))),
        on_resize: Some(Box::new(|config: &RouteConfig| {
            info!(route = ?config.route_kind, height = config.height, "callback: on_resize");
        })),
        on_balance: Some(Box::new(|info: &BalanceInfo| {
            info!(amount = info.amount, currency = %info.currency, "callback: on_balance");
        })),
        on_request: Some(Box::new(|count| {
            info!(count, "callback: on_request");
        })),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let scenario = cli.parse_scenario()?;
    let step_delay = Duration::from_millis(cli.step_delay_ms);

    info!(?scenario, "wallet-embed harness starting");

    // One page, one channel, both protocol ends.
    let page = Arc::new(MockHostPage::new());
    let transport = Arc::new(LoopbackTransport::new());
    let options = EmbedOptions::new("https://wallet.example/embed")
        .with_button(ButtonOptions::default());
    let mut embed = WalletEmbed::new(
        options,
        narrating_callbacks(),
        Arc::clone(&transport) as Arc<dyn FrameTransport>,
        Arc::clone(&page) as Arc<dyn HostPage>,
    );
    let wallet = FrameAgent::new(Arc::new(FrameEndpoint { transport: Arc::clone(&transport) }));

    match scenario {
        Scenario::Signin => run_signin(&mut embed, &wallet, &transport, step_delay).await?,
        Scenario::AutoOpen => run_auto_open(&mut embed, &wallet, cli.pending, step_delay).await?,
        Scenario::Suppression => {
            run_suppression(&mut embed, &wallet, cli.pending, step_delay).await?;
        }
    }

    let state = embed.state();
    info!(
        open = state.is_open,
        authenticated = embed.is_authenticated(),
        pending = state.pending_requests,
        auto_open = state.should_open_automatically,
        "final state"
    );
    embed.destroy();
    info!("wallet-embed harness stopped");
    Ok(())
}

// ── Scenario scripts ──────────────────────────────────────────────────────────

/// One scripted beat: let the wallet act, then drain the host's queue.
async fn step(embed: &mut WalletEmbed, step_delay: Duration) {
    tokio::time::sleep(step_delay).await;
    let handled = embed.process_pending();
    info!(handled, open = embed.is_open(), "step processed");
}

async fn run_signin(
    embed: &mut WalletEmbed,
    wallet: &FrameAgent,
    transport: &LoopbackTransport,
    step_delay: Duration,
) -> anyhow::Result<()> {
    info!("scenario: sign-in session");

    wallet.request_resize(RouteConfig::preset(RouteKind::Auth))?;
    wallet.announce_auth(None)?;
    step(embed, step_delay).await;

    wallet.announce_auth(Some(json!({ "email": "dev@example.com" })))?;
    wallet.report_balance(BalanceInfo { amount: 12.5, currency: "USD".to_string() })?;
    step(embed, step_delay).await;

    wallet.request_resize(RouteConfig::preset(RouteKind::Default))?;
    step(embed, step_delay).await;

    // The host pushes its configuration down the other way.
    embed.push_theme(json!({ "mode": "dark" }));
    embed.push_balance_currency(json!({ "currency": "USD" }));
    info!(pushed = transport.posted().len(), "configuration pushed to the wallet");
    Ok(())
}

async fn run_auto_open(
    embed: &mut WalletEmbed,
    wallet: &FrameAgent,
    pending: u64,
    step_delay: Duration,
) -> anyhow::Result<()> {
    info!("scenario: auto-open on a pending request");

    wallet.announce_auth(Some(json!({ "email": "dev@example.com" })))?;
    wallet.report_pending_requests(pending)?;
    step(embed, step_delay).await;

    wallet.request_resize(RouteConfig::preset(RouteKind::AuthRequest))?;
    step(embed, step_delay).await;
    Ok(())
}

async fn run_suppression(
    embed: &mut WalletEmbed,
    wallet: &FrameAgent,
    pending: u64,
    step_delay: Duration,
) -> anyhow::Result<()> {
    info!("scenario: dismissal suppresses auto-open");

    wallet.report_pending_requests(pending)?;
    wallet.request_resize(RouteConfig::preset(RouteKind::AuthRequest))?;
    step(embed, step_delay).await;

    info!("user dismisses the embed while requests are pending");
    embed.close()?;

    wallet.request_resize(RouteConfig::preset(RouteKind::AuthRequest))?;
    step(embed, step_delay).await;

    if embed.is_open() {
        bail!("suppression failed: the embed reopened automatically");
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wembed-harness"]);
        assert_eq!(cli.scenario, "signin");
        assert_eq!(cli.pending, 2);
        assert_eq!(cli.step_delay_ms, 150);
    }

    #[test]
    fn test_cli_scenario_override() {
        let cli = Cli::parse_from(["wembed-harness", "--scenario", "auto-open"]);
        assert_eq!(cli.parse_scenario().unwrap(), Scenario::AutoOpen);
    }

    #[test]
    fn test_cli_rejects_unknown_scenario() {
        let cli = Cli::parse_from(["wembed-harness", "--scenario", "teleport"]);
        assert!(cli.parse_scenario().is_err());
    }

    #[test]
    fn test_cli_pending_override() {
        let cli = Cli::parse_from(["wembed-harness", "--pending", "7"]);
        assert_eq!(cli.pending, 7);
    }

    #[test]
    fn test_all_scenario_names_parse() {
        for (name, expected) in [
            ("signin", Scenario::Signin),
            ("auto-open", Scenario::AutoOpen),
            ("suppression", Scenario::Suppression),
        ] {
            let cli = Cli::parse_from(["wembed-harness", "--scenario", name]);
            assert_eq!(cli.parse_scenario().unwrap(), expected);
        }
    }
}
