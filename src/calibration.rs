//! Calibration record: the on-disk form of a [`ReferenceSet`].
//!
//! Plain text, one reference per line, `;`-delimited:
//!
//! ```text
//! C;0.0312;-0.0156;0.9844
//! O;0.0469;-0.7031;0.6875
//! I;0.0391;0.6953;0.7109
//! ```
//!
//! No header, checksum or version.  Line order is irrelevant; the tag
//! decides which reference a line fills.  Unknown tags are skipped, but the
//! record is only accepted once all three states are populated.

use crate::error::RecordError;
use crate::flap::{FlapState, ReferenceSet, Vector3};

const DELIMITER: char = ';';

/// Serialise `refs` as three lines in capture order (Closed, Outside,
/// Inside).  Floats use Rust's shortest round-trip representation so that
/// parsing the output yields bit-identical vectors.
pub fn format_record(refs: &ReferenceSet) -> String {
    let mut out = String::new();
    for state in FlapState::CAPTURE_ORDER {
        let v = refs.get(state);
        out.push_str(&format!(
            "{tag}{d}{x}{d}{y}{d}{z}\n",
            tag = state.tag(),
            d = DELIMITER,
            x = v.x,
            y = v.y,
            z = v.z,
        ));
    }
    out
}

/// Parse a full record.
///
/// Blank lines are ignored.  Every other line needs a tag and three finite
/// numeric fields; extra trailing fields are tolerated.  Numeric fields are
/// validated even for unknown tags.  A repeated tag overwrites the earlier
/// line.
pub fn parse_record(text: &str) -> Result<ReferenceSet, RecordError> {
    let mut partial = PartialReferences::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let (tag, vector) = parse_line(line, line_no)?;
        match FlapState::from_tag(tag) {
            Some(state) => partial.set(state, vector),
            None => log::debug!("calibration record: skipping unknown tag {tag:?} on line {line_no}"),
        }
    }

    partial.complete()
}

fn parse_line(line: &str, line_no: usize) -> Result<(&str, Vector3), RecordError> {
    let mut fields = line.split(DELIMITER).map(str::trim);
    let tag = fields.next().unwrap_or_default();

    let mut xyz = [0.0_f32; 3];
    for slot in &mut xyz {
        let field = fields.next().ok_or(RecordError::Malformed {
            line: line_no,
            reason: "expected tag and three numeric fields",
        })?;
        let value: f32 = field.parse().map_err(|_| RecordError::Malformed {
            line: line_no,
            reason: "non-numeric field",
        })?;
        if !value.is_finite() {
            return Err(RecordError::Malformed {
                line: line_no,
                reason: "non-finite field",
            });
        }
        *slot = value;
    }

    Ok((tag, Vector3::new(xyz[0], xyz[1], xyz[2])))
}

/// Accumulates references line by line; only converts into a
/// [`ReferenceSet`] once every state is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct PartialReferences {
    closed: Option<Vector3>,
    inside: Option<Vector3>,
    outside: Option<Vector3>,
}

impl PartialReferences {
    pub fn set(&mut self, state: FlapState, vector: Vector3) {
        match state {
            FlapState::Closed => self.closed = Some(vector),
            FlapState::Inside => self.inside = Some(vector),
            FlapState::Outside => self.outside = Some(vector),
        }
    }

    pub fn complete(self) -> Result<ReferenceSet, RecordError> {
        let closed = self.closed.ok_or(RecordError::Incomplete(FlapState::Closed))?;
        let inside = self.inside.ok_or(RecordError::Incomplete(FlapState::Inside))?;
        let outside = self
            .outside
            .ok_or(RecordError::Incomplete(FlapState::Outside))?;
        Ok(ReferenceSet::new(closed, inside, outside))
    }
}
