//! Light/dark theme preference and colour palettes.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::DashboardResult;
use crate::services::kv_store::KeyValueStore;

pub const THEME_KEY: &str = "theme";

labelled_enum! {
    pub enum ThemeMode {
        Light => "light",
        Dark => "dark",
    }
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradients {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub card: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub mode: ThemeMode,
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub card_background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub shadow: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub hover: &'static str,
    pub gradient: Gradients,
}

const PRIMARY_GRADIENT: &str = "linear-gradient(135deg, #4A90E2 0%, #50E3C2 100%)";
const SECONDARY_GRADIENT: &str = "linear-gradient(135deg, #50E3C2 0%, #4A90E2 100%)";

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: "#F5F7FA",
            primary: "#4A90E2",
            secondary: "#50E3C2",
            card_background: "#FFFFFF",
            text: "#1F2937",
            text_secondary: "#6B7280",
            border: "#E5E7EB",
            shadow: "rgba(0, 0, 0, 0.1)",
            success: "#10B981",
            error: "#EF4444",
            warning: "#F59E0B",
            info: "#3B82F6",
            hover: "rgba(74, 144, 226, 0.08)",
            gradient: Gradients {
                primary: PRIMARY_GRADIENT,
                secondary: SECONDARY_GRADIENT,
                card: "linear-gradient(135deg, rgba(255, 255, 255, 0.9) 0%, rgba(255, 255, 255, 0.6) 100%)",
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: "#1F2937",
            primary: "#4A90E2",
            secondary: "#50E3C2",
            card_background: "#2A2F3A",
            text: "#E5E7EB",
            text_secondary: "#9CA3AF",
            border: "#374151",
            shadow: "rgba(0, 0, 0, 0.3)",
            success: "#10B981",
            error: "#EF4444",
            warning: "#F59E0B",
            info: "#3B82F6",
            hover: "rgba(74, 144, 226, 0.12)",
            gradient: Gradients {
                primary: PRIMARY_GRADIENT,
                secondary: SECONDARY_GRADIENT,
                card: "linear-gradient(135deg, rgba(42, 47, 58, 0.9) 0%, rgba(42, 47, 58, 0.6) 100%)",
            },
        }
    }

    /// `(--color-<key>, value)` pairs; gradients expand to
    /// `--color-gradient-<sub>`.
    pub fn css_variables(&self) -> Vec<(String, &'static str)> {
        let colours = [
            ("background", self.background),
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("cardBackground", self.card_background),
            ("text", self.text),
            ("textSecondary", self.text_secondary),
            ("border", self.border),
            ("shadow", self.shadow),
            ("success", self.success),
            ("error", self.error),
            ("warning", self.warning),
            ("info", self.info),
            ("hover", self.hover),
        ];
        let gradients = [
            ("primary", self.gradient.primary),
            ("secondary", self.gradient.secondary),
            ("card", self.gradient.card),
        ];

        colours
            .into_iter()
            .map(|(key, value)| (format!("--color-{key}"), value))
            .chain(
                gradients
                    .into_iter()
                    .map(|(sub, value)| (format!("--color-gradient-{sub}"), value)),
            )
            .collect()
    }
}

pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
    mode: RwLock<ThemeMode>,
}

impl ThemeService {
    /// Load the saved mode; without one, follow `prefers_dark`.
    pub fn load(store: Arc<dyn KeyValueStore>, prefers_dark: bool) -> Self {
        let fallback = if prefers_dark { ThemeMode::Dark } else { ThemeMode::Light };
        let mode = match store.get(THEME_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring saved theme");
                fallback
            }),
            None => fallback,
        };
        debug!(mode = %mode, "Theme loaded");

        Self {
            store,
            mode: RwLock::new(mode),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.mode())
    }

    pub fn set_mode(&self, mode: ThemeMode) -> DashboardResult<()> {
        self.store.set(THEME_KEY, mode.as_str())?;
        *self.mode.write() = mode;
        debug!(mode = %mode, "Theme changed");
        Ok(())
    }

    pub fn toggle(&self) -> DashboardResult<ThemeMode> {
        let next = self.mode().toggled();
        self.set_mode(next)?;
        Ok(next)
    }

    pub fn css_variables(&self) -> Vec<(String, &'static str)> {
        self.palette().css_variables()
    }
}
