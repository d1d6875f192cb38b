use crate::domain::Signal;
use crate::utils::TimeUtils;
use crate::utils::format_utils::{format_price, format_volume};
use crate::utils::time_utils::format_epoch_sec;

/// Absolute position of the tooltip, relative to the chart container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipStyle {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

/// One `label: value` line of tooltip content
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

/// Caller-supplied content shown for one signal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipTemplate {
    pub rows: Vec<TooltipRow>,
}

impl TooltipTemplate {
    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(TooltipRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

/// The single floating tooltip of a chart. Setters chain:
/// `tooltip.set_style(pos).set_visibility(Visibility::Visible).set_template(t)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    style: TooltipStyle,
    visibility: Visibility,
    template: Option<TooltipTemplate>,
}

impl Tooltip {
    pub fn set_style(&mut self, style: TooltipStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> &mut Self {
        self.visibility = visibility;
        self
    }

    pub fn set_template(&mut self, template: TooltipTemplate) -> &mut Self {
        self.template = Some(template);
        self
    }

    pub fn style(&self) -> TooltipStyle {
        self.style
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn template(&self) -> Option<&TooltipTemplate> {
        self.template.as_ref()
    }
}

/// Time, price and volume rows shown for a buy/sell marker
pub fn signal_template(signal: &Signal) -> TooltipTemplate {
    TooltipTemplate::default()
        .row("Time", format_epoch_sec(signal.time, TimeUtils::TOOLTIP_TIME_FORMAT))
        .row("Price", format_price(signal.price))
        .row("Volume", format_volume(signal.volume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalType;

    #[test]
    fn signal_template_formats_each_field() {
        let signal = Signal {
            kind: SignalType::Buy,
            time: 1_700_000_000,
            price: 12.3456,
            volume: 4_560_000.0,
        };
        let rows = signal_template(&signal).rows;
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["2023-11-14, 22:13", "12.35", "4.56m"]);
        assert_eq!(rows[0].label, "Time");
    }

    #[test]
    fn setters_chain_on_one_handle() {
        let mut tooltip = Tooltip::default();
        assert!(!tooltip.is_visible());

        tooltip
            .set_style(TooltipStyle {
                left: 10.0,
                top: 20.0,
            })
            .set_visibility(Visibility::Visible)
            .set_template(TooltipTemplate::default().row("Price", "12.5"));

        assert!(tooltip.is_visible());
        assert_eq!(tooltip.style().left, 10.0);
        assert_eq!(tooltip.template().map(|t| t.rows.len()), Some(1));
    }

    #[test]
    fn hiding_keeps_content() {
        let mut tooltip = Tooltip::default();
        tooltip
            .set_visibility(Visibility::Visible)
            .set_template(TooltipTemplate::default().row("Time", "now"));
        tooltip.set_visibility(Visibility::Hidden);

        assert!(!tooltip.is_visible());
        assert!(tooltip.template().is_some());
    }
}
