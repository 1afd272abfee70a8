//! Typed chart model and the chart composer.
//!
//! Every element is a plain record with named fields, checked when it is
//! built. Serialising a [`Figure`] yields the `{"data": [...], "layout": {...}}`
//! document that plotly.js renders directly, so the page script does no
//! layout work of its own.

use serde::Serialize;

use crate::constants::{
    CAPITAL_MARKER_X, CAPITAL_RECT, EXPECTED_LINE_HEADROOM, X_AXIS_RANGE, Y_AXIS_HEADROOM,
};
use crate::density::DensityCurve;
use crate::error::{FundsimError, Result};
use crate::types::Allocation;

// ── Styling primitives ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

impl LineStyle {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Font {
    pub fn color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            size: None,
        }
    }

    pub fn sized(color: &str, size: f64) -> Self {
        Self {
            color: color.to_string(),
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    ToZeroY,
}

// ── Traces ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    x: Vec<f64>,
    y: Vec<f64>,
    mode: Mode,
    name: String,
    line: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<Fill>,
}

impl ScatterTrace {
    /// Line trace; `x` and `y` must be the same length and finite.
    pub fn lines(x: Vec<f64>, y: Vec<f64>, name: impl Into<String>, line: LineStyle) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FundsimError::invalid_chart(format!(
                "scatter x/y length mismatch: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(FundsimError::invalid_chart("scatter values must be finite"));
        }
        Ok(Self {
            x,
            y,
            mode: Mode::Lines,
            name: name.into(),
            line,
            fill: None,
        })
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fill(&self) -> Option<Fill> {
        self.fill
    }
}

// ── Annotations ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    x: f64,
    y: f64,
    xref: &'static str,
    yref: &'static str,
    text: String,
    showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrowhead: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ay: Option<f64>,
    font: Font,
}

impl Annotation {
    /// Text anchored at data coordinates (x, y), no arrow.
    pub fn text(x: f64, y: f64, text: impl Into<String>, font: Font) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(FundsimError::invalid_chart(format!(
                "annotation position ({x}, {y}) is not finite"
            )));
        }
        Ok(Self {
            x,
            y,
            xref: "x",
            yref: "y",
            text: text.into(),
            showarrow: false,
            arrowhead: None,
            ax: None,
            ay: None,
            font,
        })
    }

    /// Draw an arrow from the text (offset by `ax`, `ay` pixels) to the anchor.
    pub fn with_arrow(mut self, arrowhead: u8, ax: f64, ay: f64) -> Self {
        self.showarrow = true;
        self.arrowhead = Some(arrowhead);
        self.ax = Some(ax);
        self.ay = Some(ay);
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn label(&self) -> &str {
        &self.text
    }

    pub fn has_arrow(&self) -> bool {
        self.showarrow
    }
}

// ── Shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect(RectShape),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    line: LineStyle,
    fillcolor: String,
}

impl RectShape {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, line: LineStyle, fillcolor: &str) -> Result<Self> {
        if !(x0 < x1 && y0 < y1) {
            return Err(FundsimError::invalid_chart(format!(
                "rect corners out of order: x [{x0}, {x1}], y [{y0}, {y1}]"
            )));
        }
        Ok(Self {
            x0,
            x1,
            y0,
            y1,
            line,
            fillcolor: fillcolor.to_string(),
        })
    }

    /// (x0, x1, y0, y1).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.x1, self.y0, self.y1)
    }
}

// ── Layout ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    title: Title,
    range: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    showgrid: Option<bool>,
}

impl Axis {
    pub fn new(title: &str, lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(FundsimError::invalid_chart(format!(
                "axis '{title}' has invalid range [{lo}, {hi}]"
            )));
        }
        Ok(Self {
            title: Title {
                text: title.to_string(),
            },
            range: [lo, hi],
            showgrid: None,
        })
    }

    pub fn without_grid(mut self) -> Self {
        self.showgrid = Some(false);
        self
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn title(&self) -> &str {
        &self.title.text
    }

    pub fn shows_grid(&self) -> bool {
        self.showgrid.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub annotations: Vec<Annotation>,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

// ── Composer ────────────────────────────────────────────────────────

/// Chart title for an allocation.
pub fn figure_title(allocation: Allocation) -> String {
    format!(
        "Fund Allocation: {}% in Fund A and {}% in Fund B",
        allocation.fund_a(),
        allocation.fund_b()
    )
}

/// Labels reporting the euro amount (out of 100) invested in each fund.
pub fn fund_labels(allocation: Allocation) -> (String, String) {
    (
        format!("Amount invested in Fund A: €{}", allocation.fund_a()),
        format!("Amount invested in Fund B: €{}", allocation.fund_b()),
    )
}

/// Assemble the payout chart: filled density curve, expected-return marker
/// with its label, the "Investment capital" arrow and rectangle, a fixed
/// x-axis and a y-axis scaled to the density peak.
pub fn compose_figure(curve: &DensityCurve, expected: f64, allocation: Allocation) -> Result<Figure> {
    if curve.is_empty() {
        return Err(FundsimError::empty_data("chart density curve"));
    }
    let peak = curve.peak();
    let marker_top = peak * EXPECTED_LINE_HEADROOM;

    let density_trace = ScatterTrace::lines(
        curve.x.clone(),
        curve.y.clone(),
        "Payout Density",
        LineStyle::new("lightblue", 3.0),
    )?
    .with_fill(Fill::ToZeroY);

    let expected_trace = ScatterTrace::lines(
        vec![expected, expected],
        vec![0.0, marker_top],
        format!("Expected Return: {expected:.2}"),
        LineStyle::new("red", 3.0),
    )?;

    let expected_label = Annotation::text(
        expected,
        marker_top,
        format!("Expected return: {expected:.2}"),
        Font::color("red"),
    )?;

    let capital_arrow = Annotation::text(
        CAPITAL_MARKER_X,
        0.0,
        "Investment capital",
        Font::sized("black", 14.0),
    )?
    .with_arrow(2, 0.0, -40.0);

    let (x0, x1, y0, y1) = CAPITAL_RECT;
    let capital_rect = RectShape::new(x0, x1, y0, y1, LineStyle::new("black", 1.0), "white")?;

    let layout = Layout {
        title: Title {
            text: figure_title(allocation),
        },
        xaxis: Axis::new("Payout", X_AXIS_RANGE[0], X_AXIS_RANGE[1])?,
        yaxis: Axis::new("Frequency", 0.0, peak * Y_AXIS_HEADROOM)?.without_grid(),
        annotations: vec![expected_label, capital_arrow],
        shapes: vec![Shape::Rect(capital_rect)],
    };

    Ok(Figure {
        data: vec![
            Trace::Scatter(density_trace),
            Trace::Scatter(expected_trace),
        ],
        layout,
    })
}
