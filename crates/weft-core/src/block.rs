//! Blocks: the typed computational units of a sheet.
//!
//! [`BlockKind`] is a closed sum type with one variant per block type, each
//! carrying its own parameter record. Evaluation dispatches on it with an
//! exhaustive match, so an "unknown block type" is unrepresentable — there
//! is no silent pass-through fallback to reach.
//!
//! The serde representation is internally tagged (`"type": "sum"` etc.) so
//! a JSON-model host can hand its block records straight to the kernel.

use crate::coeff::Coefficients;
use crate::error::CoefficientError;
use crate::id::BlockId;
use serde::{Deserialize, Serialize};

/// A block: host-authored identity plus a typed kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Host-authored identity, unique within a sheet.
    pub id: BlockId,
    /// The block type and its parameters.
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Convenience constructor.
    pub fn new(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

// ── BlockKind ────────────────────────────────────────────────────

/// The closed set of block types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Sum/difference arithmetic over `in1..inN`.
    #[serde(rename = "sum")]
    Sum(SumParams),
    /// Multiply/divide arithmetic over `in1..inN`.
    #[serde(rename = "multiply")]
    Multiply(MultiplyParams),
    /// Signal source: constant, generated waveform, or external variable.
    #[serde(rename = "source")]
    Source(SourceParams),
    /// Linear dynamic element: discrete-time IIR difference equation.
    #[serde(rename = "transferFunction")]
    TransferFn(TransferFnParams),
    /// Sink that records its input for host display. No output.
    #[serde(rename = "display")]
    Display,
    /// Sink that appends `{time, value}` samples to a bounded log.
    #[serde(rename = "logger")]
    Logger(LoggerParams),
    /// Pass-through port with an optional bounded export history.
    #[serde(rename = "outputPort")]
    OutputPort(OutputPortParams),
    /// Hierarchical block. Present in the data model; not executed.
    #[serde(rename = "subsystem")]
    Subsystem(SubsystemParams),
}

impl BlockKind {
    /// Number of input handles this block exposes.
    ///
    /// Variadic arithmetic exposes `in1..inN`; single-port blocks expose
    /// `in`; sources and subsystems expose none.
    pub fn input_arity(&self) -> usize {
        match self {
            Self::Sum(p) => p.inputs.max(1) as usize,
            Self::Multiply(p) => p.inputs.max(1) as usize,
            Self::Source(_) | Self::Subsystem(_) => 0,
            Self::TransferFn(_) | Self::Display | Self::Logger(_) | Self::OutputPort(_) => 1,
        }
    }

    /// Whether this block publishes an output value on `out`.
    pub fn has_output(&self) -> bool {
        match self {
            Self::Sum(_)
            | Self::Multiply(_)
            | Self::Source(_)
            | Self::TransferFn(_)
            | Self::OutputPort(_) => true,
            Self::Display | Self::Logger(_) | Self::Subsystem(_) => false,
        }
    }

    /// Whether this block carries host-visible derived fields that
    /// `reset` must blank (display values, logs, histories).
    pub fn is_sink(&self) -> bool {
        matches!(self, Self::Display | Self::Logger(_) | Self::OutputPort(_))
    }

    /// Short type label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sum(_) => "sum",
            Self::Multiply(_) => "multiply",
            Self::Source(_) => "source",
            Self::TransferFn(_) => "transferFunction",
            Self::Display => "display",
            Self::Logger(_) => "logger",
            Self::OutputPort(_) => "outputPort",
            Self::Subsystem(_) => "subsystem",
        }
    }
}

// ── Arithmetic parameters ────────────────────────────────────────

/// Operation variant for the sum block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArithOp {
    /// Output = Σ(inputs).
    #[default]
    Sum,
    /// Output = in₁ − Σ(in₂..ₙ).
    Difference,
}

/// Parameters for [`BlockKind::Sum`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumParams {
    /// Sum or difference.
    #[serde(default)]
    pub op: ArithOp,
    /// Number of input handles (`in1..inN`). Clamped to at least 1.
    #[serde(default = "default_arith_inputs")]
    pub inputs: u8,
}

impl Default for SumParams {
    fn default() -> Self {
        Self {
            op: ArithOp::Sum,
            inputs: default_arith_inputs(),
        }
    }
}

/// Operation variant for the multiply block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleOp {
    /// Output = Π(inputs).
    #[default]
    Multiply,
    /// Output = in₁ ÷ Π(in₂..ₙ), with a zero divisor-product yielding 0.
    Divide,
}

/// Parameters for [`BlockKind::Multiply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplyParams {
    /// Multiply or divide.
    #[serde(default)]
    pub op: ScaleOp,
    /// Number of input handles (`in1..inN`). Clamped to at least 1.
    #[serde(default = "default_arith_inputs")]
    pub inputs: u8,
}

impl Default for MultiplyParams {
    fn default() -> Self {
        Self {
            op: ScaleOp::Multiply,
            inputs: default_arith_inputs(),
        }
    }
}

fn default_arith_inputs() -> u8 {
    2
}

// ── Source parameters ────────────────────────────────────────────

/// Waveform shape for generated signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaveShape {
    /// The offset alone.
    #[default]
    Constant,
    /// amplitude·sin(2π·t/period) + offset.
    Sine,
    /// +amplitude for the first half-period, −amplitude for the second,
    /// plus offset.
    Square,
    /// amplitude·(t mod period)/period + offset.
    Ramp,
}

/// Generated-signal parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    /// Waveform shape.
    #[serde(default)]
    pub shape: WaveShape,
    /// Period in seconds. Non-finite or non-positive values are treated
    /// as 1.0 at evaluation time.
    #[serde(default = "default_one")]
    pub period: f64,
    /// Peak amplitude.
    #[serde(default = "default_one")]
    pub amplitude: f64,
    /// Constant offset added to the waveform.
    #[serde(default)]
    pub offset: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            shape: WaveShape::Constant,
            period: 1.0,
            amplitude: 1.0,
            offset: 0.0,
        }
    }
}

fn default_one() -> f64 {
    1.0
}

/// How a source produces its value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SourceMode {
    /// A fixed constant.
    Constant {
        /// The constant value.
        value: f64,
    },
    /// A waveform generated from the current simulation time.
    Signal(SignalParams),
    /// An externally supplied variable, set via
    /// [`Command::SetExternalInput`](crate::Command::SetExternalInput).
    External {
        /// Value used until the host supplies one.
        initial: f64,
    },
}

/// Parameters for [`BlockKind::Source`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceParams {
    /// The production mode.
    #[serde(flatten)]
    pub mode: SourceMode,
}

impl SourceParams {
    /// A constant source.
    pub fn constant(value: f64) -> Self {
        Self {
            mode: SourceMode::Constant { value },
        }
    }

    /// A generated-waveform source.
    pub fn signal(params: SignalParams) -> Self {
        Self {
            mode: SourceMode::Signal(params),
        }
    }

    /// An external-variable source.
    pub fn external(initial: f64) -> Self {
        Self {
            mode: SourceMode::External { initial },
        }
    }
}

// ── Transfer-function parameters ─────────────────────────────────

/// Parameters for [`BlockKind::TransferFn`]: normalized numerator and
/// denominator coefficients of a discrete-time IIR difference equation.
///
/// Construction validates and normalizes by a₀, so every reachable value
/// upholds `denominator()[0] == 1.0`. The serde form round-trips through
/// the authored comma-separated strings and re-validates on deserialize.
///
/// # Examples
///
/// ```
/// use weft_core::TransferFnParams;
///
/// let tf = TransferFnParams::parse("1", "1,1").unwrap();
/// assert_eq!(tf.order(), 1);
/// assert_eq!(tf.denominator(), &[1.0, 1.0]);
/// assert!(TransferFnParams::parse("1", "0,1").is_err()); // zero a₀
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransferFn", into = "RawTransferFn")]
pub struct TransferFnParams {
    num: Vec<f64>,
    den: Vec<f64>,
}

impl TransferFnParams {
    /// Parse numerator and denominator from comma-separated text.
    ///
    /// # Errors
    ///
    /// Any [`CoefficientError`] from parsing either list, plus
    /// [`CoefficientError::ZeroLeading`] when a₀ is zero.
    pub fn parse(numerator: &str, denominator: &str) -> Result<Self, CoefficientError> {
        let num = Coefficients::parse(numerator)?;
        let den = Coefficients::parse(denominator)?;
        Self::from_coefficients(&num, &den)
    }

    /// Build from pre-parsed coefficient lists, normalizing by a₀.
    ///
    /// # Errors
    ///
    /// [`CoefficientError::Empty`] when either list is empty,
    /// [`CoefficientError::ZeroLeading`] when a₀ is zero.
    pub fn from_coefficients(
        num: &Coefficients,
        den: &Coefficients,
    ) -> Result<Self, CoefficientError> {
        if num.is_empty() || den.is_empty() {
            return Err(CoefficientError::Empty);
        }
        let a0 = den.as_slice()[0];
        Ok(Self {
            num: num.normalized_by(a0)?,
            den: den.normalized_by(a0)?,
        })
    }

    /// System order: `len(denominator) − 1`. Order 0 is a static gain.
    pub fn order(&self) -> usize {
        self.den.len() - 1
    }

    /// Normalized numerator coefficients, b₀ first.
    pub fn numerator(&self) -> &[f64] {
        &self.num
    }

    /// Normalized denominator coefficients; index 0 is always 1.0.
    pub fn denominator(&self) -> &[f64] {
        &self.den
    }
}

/// Wire form of [`TransferFnParams`]: the authored comma-separated text.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawTransferFn {
    numerator: String,
    denominator: String,
}

impl TryFrom<RawTransferFn> for TransferFnParams {
    type Error = CoefficientError;

    fn try_from(raw: RawTransferFn) -> Result<Self, Self::Error> {
        Self::parse(&raw.numerator, &raw.denominator)
    }
}

impl From<TransferFnParams> for RawTransferFn {
    fn from(params: TransferFnParams) -> Self {
        let join = |cs: &[f64]| {
            cs.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        Self {
            numerator: join(&params.num),
            denominator: join(&params.den),
        }
    }
}

// ── Sink and port parameters ─────────────────────────────────────

/// Parameters for [`BlockKind::Logger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerParams {
    /// Whether samples are appended each tick.
    #[serde(default = "default_true")]
    pub recording: bool,
    /// Maximum retained samples; oldest are discarded beyond this.
    #[serde(default = "default_log_entries")]
    pub max_entries: usize,
}

impl Default for LoggerParams {
    fn default() -> Self {
        Self {
            recording: true,
            max_entries: default_log_entries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_entries() -> usize {
    100
}

/// Parameters for [`BlockKind::OutputPort`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPortParams {
    /// Whether `{time, value}` samples are retained for export.
    #[serde(default)]
    pub export_enabled: bool,
    /// Maximum retained samples; oldest are discarded beyond this.
    #[serde(default = "default_history_max")]
    pub history_max: usize,
}

impl Default for OutputPortParams {
    fn default() -> Self {
        Self {
            export_enabled: false,
            history_max: default_history_max(),
        }
    }
}

fn default_history_max() -> usize {
    1000
}

/// Parameters for [`BlockKind::Subsystem`].
///
/// The kernel does not execute subsystems; the sheet reference is carried
/// for the host's benefit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemParams {
    /// Id of the nested sheet, if the host has one.
    #[serde(default)]
    pub sheet: Option<String>,
}
