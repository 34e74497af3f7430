//! Colored logging with component prefixes
//!
//! Provides a tracing formatter that tags each line with the component
//! that emitted it (HTTP server or CLI checks).

use owo_colors::{OwoColorize, Style};
use std::fmt;
use std::io;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{
    format::{FormatEvent, FormatFields, Writer},
    FmtContext,
};
use tracing_subscriber::registry::LookupSpan;

/// Component identifier for prefixing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Server,
    Check,
}

impl Component {
    /// Get the string representation for logging prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Server => "SERVER",
            Component::Check => "CHECK",
        }
    }

    /// Get the color style for this component
    pub fn color_style(&self) -> Style {
        match self {
            Component::Server => Style::new().cyan().bold(),
            Component::Check => Style::new().yellow().bold(),
        }
    }
}

/// Five-column level tag, colored by severity
fn level_tag(level: Level) -> String {
    let tag = format!("{:<5}", level.as_str());
    let style = match level {
        Level::ERROR => Style::new().red().bold(),
        Level::WARN => Style::new().yellow().bold(),
        Level::INFO => Style::new().green(),
        Level::DEBUG => Style::new().blue(),
        Level::TRACE => Style::new().dimmed(),
    };
    tag.style(style).to_string()
}

/// `<timestamp> [COMPONENT] LEVEL message` lines
pub struct ColoredFormatter {
    pub component: Component,
}

impl<S, N> FormatEvent<S, N> for ColoredFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let prefix = format!("[{:<6}]", self.component.as_str());

        write!(
            writer,
            "{} {} {} ",
            stamp.dimmed(),
            prefix.style(self.component.color_style()),
            level_tag(*event.metadata().level()),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Initialize colored logging for a component
///
/// `RUST_LOG` directives are honoured; `level` is the default when unset.
/// Should be called once per process.
pub fn init_component_logger(component: Component, level: Level) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(ColoredFormatter { component })
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_prefixes() {
        assert_eq!(Component::Server.as_str(), "SERVER");
        assert_eq!(Component::Check.as_str(), "CHECK");
    }

    #[test]
    fn test_level_tag_is_padded() {
        assert!(level_tag(Level::WARN).contains("WARN "));
        assert!(level_tag(Level::ERROR).contains("ERROR"));
    }
}
