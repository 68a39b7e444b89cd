//! Route and layout vocabulary for the embedded document's presentation.
//!
//! The embedded document owns its own navigation.  All the host page learns
//! about it arrives as a [`RouteConfig`]: which screen kind is showing, which
//! layout it prefers, and the footprint it wants.  A `RouteConfig` is always
//! replaced wholesale: the protocol deliberately has no partial update, so
//! the host never needs merge logic and tolerates message loss for free (the
//! next resize resynchronizes everything).

use serde::{Deserialize, Serialize};

// ── Route kinds ───────────────────────────────────────────────────────────────

/// The screen family the embedded document is currently presenting.
///
/// The wire representation is kebab-case (`"auth-request"` etc.), matching
/// the strings the embedded document emits in its `resize` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    /// The signed-in landing screen.
    Default,
    /// Sign-in / sign-up flow.
    Auth,
    /// Account management (addresses, profile).
    Account,
    /// Settings screens.
    Settings,
    /// A flow that requires the user's attention right now (e.g. a pending
    /// signature request).  Receiving a resize for this kind may auto-open
    /// the embed.
    AuthRequest,
}

/// The layout family the embedded document prefers for its current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredLayout {
    /// Full-width presentation (account tables, settings panels).
    Wide,
    /// Narrow card presentation (auth and request flows).
    Compact,
}

// ── RouteConfig ───────────────────────────────────────────────────────────────

/// The embedded document's self-reported desired presentation.
///
/// Produced by the embedded document (or by [`RouteConfig::preset`] when the
/// host steers toward a screen after an auth change) and replaced wholesale
/// on every `resize` message.
///
/// `width` is optional: an absent width means "let the layout choose", not
/// "zero".  `height` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Which screen family is showing.
    #[serde(rename = "routeKind")]
    pub route_kind: RouteKind,
    /// Which layout family the document prefers.
    #[serde(rename = "preferredLayout")]
    pub preferred_layout: PreferredLayout,
    /// Desired width in CSS pixels, if the document wants to pin it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Desired height in CSS pixels.
    pub height: f64,
}

impl RouteConfig {
    /// Returns the standard footprint for a screen family.
    ///
    /// Used by the host when it steers the embed toward a screen before the
    /// embedded document has reported its own footprint (the document's next
    /// `resize` replaces this wholesale).
    pub fn preset(kind: RouteKind) -> Self {
        match kind {
            RouteKind::Default => Self {
                route_kind: kind,
                preferred_layout: PreferredLayout::Compact,
                width: Some(375.0),
                height: 600.0,
            },
            RouteKind::Auth | RouteKind::AuthRequest => Self {
                route_kind: kind,
                preferred_layout: PreferredLayout::Compact,
                width: Some(375.0),
                height: 569.0,
            },
            RouteKind::Account | RouteKind::Settings => Self {
                route_kind: kind,
                preferred_layout: PreferredLayout::Wide,
                width: Some(760.0),
                height: 600.0,
            },
        }
    }
}

// ── Balance record ────────────────────────────────────────────────────────────

/// A balance snapshot reported by the embedded document.
///
/// Display-only: the host renders it on the trigger control and forwards it
/// to the embedding application's callback, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceInfo {
    /// Amount in the reported currency.
    pub amount: f64,
    /// Currency code (e.g. `"USD"`, `"ETH"`).
    pub currency: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&RouteKind::AuthRequest).unwrap();
        assert_eq!(json, r#""auth-request""#);
    }

    #[test]
    fn test_route_kind_deserializes_kebab_case() {
        let kind: RouteKind = serde_json::from_str(r#""auth-request""#).unwrap();
        assert_eq!(kind, RouteKind::AuthRequest);
    }

    #[test]
    fn test_route_kind_rejects_unknown_string() {
        let result: Result<RouteKind, _> = serde_json::from_str(r#""popup""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_preferred_layout_round_trips() {
        for layout in [PreferredLayout::Wide, PreferredLayout::Compact] {
            let json = serde_json::to_string(&layout).unwrap();
            let decoded: PreferredLayout = serde_json::from_str(&json).unwrap();
            assert_eq!(layout, decoded);
        }
    }

    #[test]
    fn test_route_config_width_is_optional_on_the_wire() {
        // Arrange: no width field at all
        let json = r#"{"routeKind":"default","preferredLayout":"compact","height":600}"#;

        // Act
        let config: RouteConfig = serde_json::from_str(json).unwrap();

        // Assert: absent width means "let the layout choose"
        assert_eq!(config.width, None);
        assert!((config.height - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_route_config_missing_height_is_rejected() {
        let json = r#"{"routeKind":"default","preferredLayout":"compact"}"#;
        let result: Result<RouteConfig, _> = serde_json::from_str(json);
        assert!(result.is_err(), "height is a required field");
    }

    #[test]
    fn test_route_config_omits_absent_width_when_serialized() {
        let config = RouteConfig {
            route_kind: RouteKind::Default,
            preferred_layout: PreferredLayout::Compact,
            width: None,
            height: 600.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("width"));
    }

    #[test]
    fn test_preset_auth_is_compact() {
        let config = RouteConfig::preset(RouteKind::Auth);
        assert_eq!(config.route_kind, RouteKind::Auth);
        assert_eq!(config.preferred_layout, PreferredLayout::Compact);
        assert_eq!(config.width, Some(375.0));
    }

    #[test]
    fn test_preset_settings_is_wide() {
        let config = RouteConfig::preset(RouteKind::Settings);
        assert_eq!(config.preferred_layout, PreferredLayout::Wide);
        assert_eq!(config.width, Some(760.0));
    }

    #[test]
    fn test_balance_info_round_trips() {
        let info = BalanceInfo { amount: 12.5, currency: "USD".to_string() };
        let json = serde_json::to_string(&info).unwrap();
        let decoded: BalanceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, decoded);
    }
}
