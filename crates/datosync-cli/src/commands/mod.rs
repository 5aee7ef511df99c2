pub mod diff;
pub mod pull;

use crate::GlobalArgs;
use anyhow::Context as _;
use datosync_core::report::ColorMode;
use datosync_engine::{SiteApiClient, SiteApiConfig};
use std::ffi::OsStr;
use std::io::IsTerminal;

/// Whether a command completed or printed a failure diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
}

/// Shared state built once from the global arguments
pub struct Context {
    pub color: ColorMode,
    pub client: SiteApiClient,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        let color = color_mode(
            args.no_color,
            std::env::var_os("NO_COLOR").as_deref(),
            std::io::stdout().is_terminal(),
        );
        let config = SiteApiConfig::default().with_base_url(args.site_api_url.clone());
        let client = SiteApiClient::new(config).context("cannot set up the Site API client")?;
        Ok(Self { color, client })
    }
}

/// Any non-empty `NO_COLOR` disables colour, whatever its value.
fn color_mode(no_color_flag: bool, no_color_env: Option<&OsStr>, stdout_is_tty: bool) -> ColorMode {
    let env_set = no_color_env.is_some_and(|v| !v.is_empty());
    if no_color_flag || env_set || !stdout_is_tty {
        ColorMode::Plain
    } else {
        ColorMode::Ansi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_on_for_tty_without_overrides() {
        assert_eq!(color_mode(false, None, true), ColorMode::Ansi);
        assert_eq!(color_mode(false, Some(OsStr::new("")), true), ColorMode::Ansi);
    }

    #[test]
    fn test_any_non_empty_no_color_disables_color() {
        for value in ["1", "0", "false", "no"] {
            assert_eq!(
                color_mode(false, Some(OsStr::new(value)), true),
                ColorMode::Plain,
                "NO_COLOR={value}"
            );
        }
    }

    #[test]
    fn test_flag_and_non_tty_disable_color() {
        assert_eq!(color_mode(true, None, true), ColorMode::Plain);
        assert_eq!(color_mode(false, None, false), ColorMode::Plain);
    }
}
