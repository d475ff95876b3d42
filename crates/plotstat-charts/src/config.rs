//! Chart configuration
//!
//! A chart is a small table of choices (which fields, which category order,
//! which reducer, which scale) rather than code. Configurations are read
//! from TOML with one `[[chart]]` table per chart:
//!
//! ```toml
//! [[chart]]
//! kind = "bar"
//! title = "Average Monthly Temperature"
//! value_field = "Data.Temperature.Avg Temp"
//! category = { field = "Date.Month", domain = "months", rule = { ordinal = { base = 1 } } }
//! ```

use crate::error::{ChartError, ChartResult};
use plotstat_records::{CategoryDomain, CategoryField, CategoryRule, Row};
use plotstat_scale::{PlotLayout, ScaleKind};
use plotstat_stats::Reducer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A set of charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "chart", default)]
    pub charts: Vec<ChartSpec>,
}

impl ChartConfig {
    /// Parse a TOML document and validate every chart
    pub fn from_toml_str(toml_str: &str) -> ChartResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        tracing::debug!(charts = config.charts.len(), "loaded chart configuration");
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> ChartResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Find a chart by title
    pub fn get(&self, title: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.title() == title)
    }

    /// Check values serde cannot express as types
    pub fn validate(&self) -> ChartResult<()> {
        for chart in &self.charts {
            chart.validate()?;
        }
        Ok(())
    }
}

/// One configured chart, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Dot(DotPlot),
    HeatMap(HeatMap),
    Histogram(HistogramChart),
    BoxPlot(BoxPlot),
    Strip(StripChart),
    Scatter(ScatterPlot),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(c) => &c.title,
            ChartSpec::Dot(c) => &c.title,
            ChartSpec::HeatMap(c) => &c.title,
            ChartSpec::Histogram(c) => &c.title,
            ChartSpec::BoxPlot(c) => &c.title,
            ChartSpec::Strip(c) => &c.title,
            ChartSpec::Scatter(c) => &c.title,
        }
    }

    pub fn layout(&self) -> &PlotLayout {
        match self {
            ChartSpec::Bar(c) => &c.layout,
            ChartSpec::Dot(c) => &c.layout,
            ChartSpec::HeatMap(c) => &c.layout,
            ChartSpec::Histogram(c) => &c.layout,
            ChartSpec::BoxPlot(c) => &c.layout,
            ChartSpec::Strip(c) => &c.layout,
            ChartSpec::Scatter(c) => &c.layout,
        }
    }

    /// Kind name as written in configuration
    pub fn kind(&self) -> &'static str {
        match self {
            ChartSpec::Bar(_) => "bar",
            ChartSpec::Dot(_) => "dot",
            ChartSpec::HeatMap(_) => "heat_map",
            ChartSpec::Histogram(_) => "histogram",
            ChartSpec::BoxPlot(_) => "box_plot",
            ChartSpec::Strip(_) => "strip",
            ChartSpec::Scatter(_) => "scatter",
        }
    }

    fn validate(&self) -> ChartResult<()> {
        let invalid = |msg: String| ChartError::InvalidConfig(format!("{}: {}", self.title(), msg));

        let layout = self.layout();
        if layout.plot_width() <= 0.0 || layout.plot_height() <= 0.0 {
            return Err(invalid(format!(
                "margins leave no plot area in a {}x{} canvas",
                layout.width, layout.height
            )));
        }

        match self {
            ChartSpec::Bar(c) => {
                check_padding(c.padding).map_err(invalid)?;
                check_positive("headroom", c.headroom).map_err(invalid)?;
            }
            ChartSpec::Dot(c) => {
                check_padding(c.padding).map_err(invalid)?;
                check_positive("radius", c.radius).map_err(invalid)?;
                if c.scale == ScaleKind::Log {
                    check_positive("log_floor", c.log_floor).map_err(invalid)?;
                }
            }
            ChartSpec::HeatMap(c) => check_padding(c.padding).map_err(invalid)?,
            ChartSpec::Histogram(c) => {
                if let Some(fraction) = c.truncate {
                    if !(fraction > 0.0 && fraction <= 1.0) {
                        return Err(invalid(format!(
                            "truncate must be in (0, 1], got {}",
                            fraction
                        )));
                    }
                }
                let n = match c.binning {
                    Binning::EqualWidth { bins } => bins,
                    Binning::Ticks { count } => count,
                };
                if n == 0 {
                    return Err(invalid("binning needs at least one bin".to_string()));
                }
            }
            ChartSpec::BoxPlot(c) => {
                if !(c.domain_padding >= 0.0 && c.domain_padding.is_finite()) {
                    return Err(invalid("domain_padding must not be negative".to_string()));
                }
                check_positive("box_width", c.box_width).map_err(invalid)?;
                check_positive("radius", c.radius).map_err(invalid)?;
            }
            ChartSpec::Strip(c) => check_positive("radius", c.radius).map_err(invalid)?,
            ChartSpec::Scatter(c) => {
                let (low, high) = c.domain_factors;
                check_positive("domain_factors", low).map_err(invalid)?;
                check_positive("domain_factors", high).map_err(invalid)?;
                check_positive("radius", c.radius).map_err(invalid)?;
            }
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), String> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(format!("{} must be positive, got {}", name, value))
    }
}

fn check_padding(padding: f64) -> Result<(), String> {
    if (0.0..1.0).contains(&padding) {
        Ok(())
    } else {
        Err(format!("padding must be in [0, 1), got {}", padding))
    }
}

/// Where a category domain comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainSource {
    /// `Jan` through `Dec`
    Months,
    /// `0` through `23`
    Hours,
    /// Explicit labels in display order
    Labels(Vec<String>),
    /// Sorted distinct values of the field, optionally capped
    Distinct {
        #[serde(default)]
        limit: Option<usize>,
    },
}

/// A categorical field and how to read it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub field: String,
    pub domain: DomainSource,
    #[serde(default)]
    pub rule: CategoryRule,
}

impl CategorySpec {
    pub fn new(field: impl Into<String>, domain: DomainSource) -> Self {
        Self {
            field: field.into(),
            domain,
            rule: CategoryRule::Label,
        }
    }

    pub fn with_rule(mut self, rule: CategoryRule) -> Self {
        self.rule = rule;
        self
    }

    /// Build the concrete field, scanning `rows` for distinct domains
    pub fn resolve<R: Row>(&self, rows: &[R]) -> CategoryField {
        let domain = match &self.domain {
            DomainSource::Months => CategoryDomain::months(),
            DomainSource::Hours => CategoryDomain::hours(),
            DomainSource::Labels(labels) => CategoryDomain::new(labels.iter().cloned()),
            DomainSource::Distinct { limit } => {
                CategoryDomain::from_distinct(rows.iter().filter_map(|r| r.field(&self.field)), *limit)
            }
        };
        CategoryField::new(self.field.clone(), domain).with_rule(self.rule)
    }
}

fn mean() -> Reducer {
    Reducer::Mean
}

fn sum() -> Reducer {
    Reducer::Sum
}

fn log() -> ScaleKind {
    ScaleKind::Log
}

/// Bars per category, linear or log value axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub category: CategorySpec,
    pub value_field: String,
    #[serde(default = "mean")]
    pub reducer: Reducer,
    #[serde(default)]
    pub scale: ScaleKind,
    /// Band padding as a fraction of a step
    #[serde(default = "BarChart::default_padding")]
    pub padding: f64,
    /// Factor applied to the largest value for the top of the value axis
    #[serde(default = "BarChart::default_headroom")]
    pub headroom: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl BarChart {
    /// Bottom of a log value axis; bars rise from here
    pub const LOG_FLOOR: f64 = 1.0;

    fn default_padding() -> f64 {
        0.2
    }

    fn default_headroom() -> f64 {
        1.1
    }

    pub fn new(title: impl Into<String>, category: CategorySpec, value_field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category,
            value_field: value_field.into(),
            reducer: mean(),
            scale: ScaleKind::Linear,
            padding: Self::default_padding(),
            headroom: Self::default_headroom(),
            layout: PlotLayout::default(),
        }
    }
}

/// One dot per category, log value axis by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlot {
    pub title: String,
    pub category: CategorySpec,
    pub value_field: String,
    #[serde(default = "sum")]
    pub reducer: Reducer,
    #[serde(default = "log")]
    pub scale: ScaleKind,
    #[serde(default = "DotPlot::default_padding")]
    pub padding: f64,
    /// Smallest value drawn on a log axis; lower readings are raised to it
    #[serde(default = "DotPlot::default_log_floor")]
    pub log_floor: f64,
    #[serde(default = "DotPlot::default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl DotPlot {
    fn default_padding() -> f64 {
        0.3
    }

    fn default_log_floor() -> f64 {
        0.1
    }

    fn default_radius() -> f64 {
        6.0
    }

    pub fn new(title: impl Into<String>, category: CategorySpec, value_field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category,
            value_field: value_field.into(),
            reducer: sum(),
            scale: log(),
            padding: Self::default_padding(),
            log_floor: Self::default_log_floor(),
            radius: Self::default_radius(),
            layout: PlotLayout::default(),
        }
    }
}

/// Tiles over two categorical axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatMap {
    pub title: String,
    /// Vertical axis categories
    pub rows: CategorySpec,
    /// Horizontal axis categories
    pub columns: CategorySpec,
    pub value_field: String,
    #[serde(default = "mean")]
    pub reducer: Reducer,
    #[serde(default = "HeatMap::default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl HeatMap {
    fn default_padding() -> f64 {
        0.05
    }

    pub fn new(
        title: impl Into<String>,
        rows: CategorySpec,
        columns: CategorySpec,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            rows,
            columns,
            value_field: value_field.into(),
            reducer: mean(),
            padding: Self::default_padding(),
            layout: PlotLayout::default(),
        }
    }
}

/// How histogram bins are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Binning {
    /// `bins` equal-width bins over the data extent
    EqualWidth { bins: usize },
    /// Threshold bins at about `count` nice ticks over `[0, max]`
    Ticks { count: usize },
}

impl Default for Binning {
    fn default() -> Self {
        Binning::EqualWidth { bins: 30 }
    }
}

/// Distribution of one numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChart {
    pub title: String,
    pub value_field: String,
    /// Keep only this fraction of the smallest values
    #[serde(default)]
    pub truncate: Option<f64>,
    #[serde(default)]
    pub binning: Binning,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl HistogramChart {
    pub fn new(title: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value_field: value_field.into(),
            truncate: None,
            binning: Binning::default(),
            layout: PlotLayout::default(),
        }
    }
}

/// Single box and whisker plot of one numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    pub title: String,
    pub value_field: String,
    /// Added below the minimum and above the maximum on the value axis
    #[serde(default = "BoxPlot::default_domain_padding")]
    pub domain_padding: f64,
    #[serde(default = "BoxPlot::default_box_width")]
    pub box_width: f64,
    #[serde(default = "BoxPlot::default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl BoxPlot {
    fn default_domain_padding() -> f64 {
        2.5
    }

    fn default_box_width() -> f64 {
        80.0
    }

    fn default_radius() -> f64 {
        6.0
    }

    pub fn new(title: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value_field: value_field.into(),
            domain_padding: Self::default_domain_padding(),
            box_width: Self::default_box_width(),
            radius: Self::default_radius(),
            layout: PlotLayout::default(),
        }
    }
}

/// One point per row along a categorical vertical axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripChart {
    pub title: String,
    #[serde(default = "StripChart::default_category")]
    pub category: CategorySpec,
    #[serde(default = "StripChart::default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl StripChart {
    fn default_category() -> CategorySpec {
        CategorySpec::new("hour", DomainSource::Hours).with_rule(CategoryRule::Ordinal { base: 0 })
    }

    fn default_radius() -> f64 {
        4.0
    }

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Self::default_category(),
            radius: Self::default_radius(),
            layout: PlotLayout::default(),
        }
    }
}

/// Two numeric fields against each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    /// Factors applied to the minimum and maximum of each axis
    #[serde(default = "ScatterPlot::default_domain_factors")]
    pub domain_factors: (f64, f64),
    #[serde(default = "ScatterPlot::default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub layout: PlotLayout,
}

impl ScatterPlot {
    fn default_domain_factors() -> (f64, f64) {
        (0.9, 1.1)
    }

    fn default_radius() -> f64 {
        5.0
    }

    pub fn new(title: impl Into<String>, x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_field: x_field.into(),
            y_field: y_field.into(),
            domain_factors: Self::default_domain_factors(),
            radius: Self::default_radius(),
            layout: PlotLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = r#"
[[chart]]
kind = "bar"
title = "Average Monthly Temperature"
value_field = "Data.Temperature.Avg Temp"
scale = "log"
category = { field = "Date.Month", domain = "months", rule = { ordinal = { base = 1 } } }

[[chart]]
kind = "heat_map"
title = "Temperature by City and Month"
value_field = "Data.Temperature.Avg Temp"
rows = { field = "Station.City", domain = { distinct = { limit = 8 } } }
columns = { field = "Date.Month", domain = "months", rule = { ordinal = { base = 1 } } }

[chart.layout]
width = 900
height = 500
margin = { top = 100, right = 30, bottom = 100, left = 120 }

[[chart]]
kind = "histogram"
title = "Precipitation"
value_field = "Data.Precipitation"
binning = { method = "ticks", count = 20 }
"#;

    #[test]
    fn test_parse_weather_charts() {
        let config = ChartConfig::from_toml_str(WEATHER).unwrap();
        assert_eq!(config.charts.len(), 3);

        let ChartSpec::Bar(bar) = &config.charts[0] else {
            panic!("expected a bar chart");
        };
        assert_eq!(bar.reducer, Reducer::Mean);
        assert_eq!(bar.scale, ScaleKind::Log);
        assert_eq!(bar.padding, 0.2);
        assert_eq!(bar.category.rule, CategoryRule::Ordinal { base: 1 });

        let ChartSpec::HeatMap(heat) = &config.charts[1] else {
            panic!("expected a heat map");
        };
        assert_eq!(heat.rows.domain, DomainSource::Distinct { limit: Some(8) });
        assert_eq!(heat.layout.width, 900.0);
        assert_eq!(heat.layout.margin.left, 120.0);

        let histogram = config.get("Precipitation").unwrap();
        assert_eq!(histogram.kind(), "histogram");
    }

    #[test]
    fn test_defaults_per_kind() {
        let config = ChartConfig::from_toml_str(
            r#"
[[chart]]
kind = "dot"
title = "Monthly Total Precipitation"
value_field = "Data.Precipitation"
category = { field = "Date.Month", domain = "months" }

[[chart]]
kind = "strip"
title = "Sighting Hours"
"#,
        )
        .unwrap();
        let ChartSpec::Dot(dot) = &config.charts[0] else {
            panic!("expected a dot plot");
        };
        assert_eq!(dot.reducer, Reducer::Sum);
        assert_eq!(dot.scale, ScaleKind::Log);
        assert_eq!(dot.log_floor, 0.1);
        assert_eq!(dot.category.rule, CategoryRule::Label);

        let ChartSpec::Strip(strip) = &config.charts[1] else {
            panic!("expected a strip chart");
        };
        assert_eq!(strip.category.field, "hour");
        assert_eq!(strip.category.domain, DomainSource::Hours);
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = ChartConfig::from_toml_str("[[chart]]\nkind = \"pie\"\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, ChartError::Parse(_)));
    }

    #[test]
    fn test_invalid_values() {
        let mut histogram = HistogramChart::new("Durations", "duration");
        histogram.truncate = Some(1.5);
        let config = ChartConfig {
            charts: vec![ChartSpec::Histogram(histogram)],
        };
        assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

        let mut bar = BarChart::new(
            "Temps",
            CategorySpec::new("month", DomainSource::Months),
            "temp",
        );
        bar.layout.width = 50.0;
        let config = ChartConfig {
            charts: vec![ChartSpec::Bar(bar)],
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no plot area"));
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        let mut bar = BarChart::new("Temps", CategorySpec::new("month", DomainSource::Months), "temp");
        bar.headroom = 0.0;
        let mut box_plot = BoxPlot::new("Years", "year");
        box_plot.box_width = -80.0;
        let mut scatter = ScatterPlot::new("Temps", "min", "max");
        scatter.domain_factors = (0.0, 1.1);
        let mut strip = StripChart::new("Hours");
        strip.radius = f64::NAN;

        for (chart, field) in [
            (ChartSpec::Bar(bar), "headroom"),
            (ChartSpec::BoxPlot(box_plot), "box_width"),
            (ChartSpec::Scatter(scatter), "domain_factors"),
            (ChartSpec::Strip(strip), "radius"),
        ] {
            let config = ChartConfig { charts: vec![chart] };
            match config.validate() {
                Err(ChartError::InvalidConfig(msg)) => assert!(msg.contains(field), "{}", msg),
                other => panic!("expected InvalidConfig for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_json_round_trip() {
        let config = ChartConfig::from_toml_str(WEATHER).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ChartConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_explicit_labels_domain() {
        let spec = CategorySpec::new(
            "city",
            DomainSource::Labels(vec!["Boston".into(), "Austin".into()]),
        );
        let rows: Vec<std::collections::HashMap<String, String>> = vec![];
        let field = spec.resolve(&rows);
        assert_eq!(field.domain.labels(), ["Boston", "Austin"]);
    }
}
