//! Expand/collapse behavior options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{OptionValues, OptionsBag};
use crate::action::Icon;
use crate::error::{CoreError, CoreResult};

/// How groups expand and collapse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandCollapseConfig {
    /// Animate interactive toggles. Programmatic changes never animate.
    pub animation_enabled: bool,
    /// Length of one expand or collapse run.
    pub duration_ms: u64,
    /// Time between animation ticks, independent of the duration.
    pub tick_interval_ms: u64,
    /// Whether interactive toggles are allowed at all.
    pub collapsible: bool,
    /// Draw the expand/collapse indicator in group headers.
    pub show_indicator: bool,
    pub expanded_icon: Option<Icon>,
    pub collapsed_icon: Option<Icon>,
}

impl Default for ExpandCollapseConfig {
    fn default() -> Self {
        Self {
            animation_enabled: true,
            duration_ms: 200,
            tick_interval_ms: 10,
            collapsible: true,
            show_indicator: true,
            expanded_icon: None,
            collapsed_icon: None,
        }
    }
}

impl ExpandCollapseConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl OptionValues for ExpandCollapseConfig {
    const KIND: &'static str = "ExpandCollapse";

    fn validate(&self) -> CoreResult<()> {
        if self.duration_ms == 0 {
            return Err(CoreError::NonPositiveDuration);
        }
        if self.tick_interval_ms == 0 {
            return Err(CoreError::NonPositiveTickInterval);
        }
        Ok(())
    }
}

/// Listenable expand/collapse options.
pub type ExpandCollapseOptions = OptionsBag<ExpandCollapseConfig>;

impl OptionsBag<ExpandCollapseConfig> {
    pub fn is_animation_enabled(&self) -> bool {
        self.read(|v| v.animation_enabled)
    }

    pub fn set_animation_enabled(&self, enabled: bool) {
        self.update(|v| v.animation_enabled = enabled);
    }

    pub fn duration(&self) -> Duration {
        self.read(|v| v.duration())
    }

    /// Set the animation duration. Durations under one millisecond are
    /// rejected.
    pub fn set_duration(&self, duration: Duration) -> CoreResult<()> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 {
            return Err(CoreError::NonPositiveDuration);
        }
        self.update(|v| v.duration_ms = millis);
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        self.read(|v| v.tick_interval())
    }

    pub fn set_tick_interval(&self, interval: Duration) -> CoreResult<()> {
        let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 {
            return Err(CoreError::NonPositiveTickInterval);
        }
        self.update(|v| v.tick_interval_ms = millis);
        Ok(())
    }

    pub fn is_collapsible(&self) -> bool {
        self.read(|v| v.collapsible)
    }

    pub fn set_collapsible(&self, collapsible: bool) {
        self.update(|v| v.collapsible = collapsible);
    }

    pub fn shows_indicator(&self) -> bool {
        self.read(|v| v.show_indicator)
    }

    pub fn set_show_indicator(&self, show: bool) {
        self.update(|v| v.show_indicator = show);
    }

    pub fn expanded_icon(&self) -> Option<Icon> {
        self.read(|v| v.expanded_icon.clone())
    }

    pub fn set_expanded_icon(&self, icon: Option<Icon>) {
        self.update(|v| v.expanded_icon = icon);
    }

    pub fn collapsed_icon(&self) -> Option<Icon> {
        self.read(|v| v.collapsed_icon.clone())
    }

    pub fn set_collapsed_icon(&self, icon: Option<Icon>) {
        self.update(|v| v.collapsed_icon = icon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_validation() {
        let options = ExpandCollapseOptions::new();
        assert_eq!(
            options.set_duration(Duration::ZERO),
            Err(CoreError::NonPositiveDuration)
        );
        assert_eq!(
            options.set_duration(Duration::from_micros(400)),
            Err(CoreError::NonPositiveDuration)
        );
        assert_eq!(options.duration(), Duration::from_millis(200));

        options.set_duration(Duration::from_millis(350)).unwrap();
        assert_eq!(options.duration(), Duration::from_millis(350));
    }

    #[test]
    fn test_tick_interval_validation() {
        let options = ExpandCollapseOptions::new();
        assert_eq!(
            options.set_tick_interval(Duration::ZERO),
            Err(CoreError::NonPositiveTickInterval)
        );
        options.set_tick_interval(Duration::from_millis(16)).unwrap();
        assert_eq!(options.tick_interval(), Duration::from_millis(16));
    }
}
