//! Canonical binary encoding of lineups, picks and commitment preimages.
//!
//! Commitments must be reproducible by any verifier, so the byte layout is
//! fixed: a domain tag, a version byte, little-endian fixed-width integers,
//! `u32` length prefixes for sequences, and a `0`/`1` presence byte for
//! optional fields.
//!
//! ```text
//! lineup := "sealdraft:lineup:" ver:u8
//!           n:u32 player:u32*n
//!           0 | 1 n:u32 position:u32*n
//!           0 | 1 captain:u32
//!           0 | 1 vice:u32
//! pick   := "sealdraft:pick:" ver:u8 player:u32 round:u32
//! commit := "sealdraft:commit:" ver:u8 lineup salt:[u8;16] timestamp_ms:u64
//! ```
//!
//! Decoding is strict (unknown version, bad tag byte, truncation and
//! trailing bytes are all rejected), so one lineup has exactly one encoding.

use crate::{
    LineupSelection, PlayerId, PlayerSelection, PositionCode, Salt,
    constants::{CODEC_VERSION, COMMIT_DOMAIN, LINEUP_DOMAIN, PICK_DOMAIN, SALT_SIZE},
    error::{Result, SealdraftError},
};

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

/// Encode a lineup. The output is a pure function of the value.
#[must_use]
pub fn encode_lineup(selection: &LineupSelection) -> Vec<u8> {
    let mut buf = Vec::with_capacity(LINEUP_DOMAIN.len() + 32 + selection.len() * 8);
    buf.extend_from_slice(LINEUP_DOMAIN);
    buf.push(CODEC_VERSION);
    write_lineup_body(&mut buf, selection);
    buf
}

/// Decode a lineup produced by [`encode_lineup`].
pub fn decode_lineup(bytes: &[u8]) -> Result<LineupSelection> {
    let mut reader = Reader::new(bytes);
    reader.expect_header(LINEUP_DOMAIN)?;
    let selection = read_lineup_body(&mut reader)?;
    reader.finish()?;
    Ok(selection)
}

/// Encode a single draft pick.
#[must_use]
pub fn encode_pick(pick: &PlayerSelection) -> Vec<u8> {
    let mut buf = Vec::with_capacity(PICK_DOMAIN.len() + 9);
    buf.extend_from_slice(PICK_DOMAIN);
    buf.push(CODEC_VERSION);
    buf.extend_from_slice(&pick.player_id.0.to_le_bytes());
    buf.extend_from_slice(&pick.round.to_le_bytes());
    buf
}

/// Decode a pick produced by [`encode_pick`].
pub fn decode_pick(bytes: &[u8]) -> Result<PlayerSelection> {
    let mut reader = Reader::new(bytes);
    reader.expect_header(PICK_DOMAIN)?;
    let player_id = PlayerId(reader.u32()?);
    let round = reader.u32()?;
    reader.finish()?;
    Ok(PlayerSelection { player_id, round })
}

/// Bytes hashed into a commitment for `(selection, salt, timestamp_ms)`.
#[must_use]
pub fn commitment_preimage(selection: &LineupSelection, salt: &Salt, timestamp_ms: u64) -> Vec<u8> {
    let mut buf =
        Vec::with_capacity(COMMIT_DOMAIN.len() + 64 + selection.len() * 8 + SALT_SIZE);
    buf.extend_from_slice(COMMIT_DOMAIN);
    buf.push(CODEC_VERSION);
    write_lineup_body(&mut buf, selection);
    buf.extend_from_slice(salt.as_bytes());
    buf.extend_from_slice(&timestamp_ms.to_le_bytes());
    buf
}

fn write_len(buf: &mut Vec<u8>, len: usize) {
    // A roster anywhere near u32::MAX entries cannot exist in memory.
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    buf.extend_from_slice(&len.to_le_bytes());
}

fn write_optional(buf: &mut Vec<u8>, value: Option<u32>) {
    match value {
        Some(v) => {
            buf.push(PRESENT);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        None => buf.push(ABSENT),
    }
}

fn write_lineup_body(buf: &mut Vec<u8>, selection: &LineupSelection) {
    write_len(buf, selection.player_ids.len());
    for id in &selection.player_ids {
        buf.extend_from_slice(&id.0.to_le_bytes());
    }

    match &selection.positions {
        Some(positions) => {
            buf.push(PRESENT);
            write_len(buf, positions.len());
            for pos in positions {
                buf.extend_from_slice(&pos.0.to_le_bytes());
            }
        }
        None => buf.push(ABSENT),
    }

    write_optional(buf, selection.captain.map(|c| c.0));
    write_optional(buf, selection.vice_captain.map(|v| v.0));
}

fn read_lineup_body(reader: &mut Reader<'_>) -> Result<LineupSelection> {
    let count = reader.len_prefix()?;
    let mut player_ids = Vec::with_capacity(count);
    for _ in 0..count {
        player_ids.push(PlayerId(reader.u32()?));
    }

    let positions = if reader.presence()? {
        let count = reader.len_prefix()?;
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(PositionCode(reader.u32()?));
        }
        Some(positions)
    } else {
        None
    };

    let captain = reader.optional_u32()?.map(PlayerId);
    let vice_captain = reader.optional_u32()?.map(PlayerId);

    Ok(LineupSelection {
        player_ids,
        positions,
        captain,
        vice_captain,
    })
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                SealdraftError::Serialization(format!(
                    "truncated input: need {n} bytes at offset {}",
                    self.pos
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn expect_header(&mut self, domain: &[u8]) -> Result<()> {
        if self.take(domain.len())? != domain {
            return Err(SealdraftError::Serialization(format!(
                "missing domain tag {}",
                String::from_utf8_lossy(domain)
            )));
        }
        let version = self.u8()?;
        if version != CODEC_VERSION {
            return Err(SealdraftError::Serialization(format!(
                "unsupported codec version {version}"
            )));
        }
        Ok(())
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(raw))
    }

    fn len_prefix(&mut self) -> Result<usize> {
        let len = self.u32()? as usize;
        // Each element is 4 bytes; refuse lengths the input cannot hold
        // before allocating.
        if len.saturating_mul(4) > self.bytes.len() - self.pos {
            return Err(SealdraftError::Serialization(format!(
                "length prefix {len} exceeds remaining input"
            )));
        }
        Ok(len)
    }

    fn presence(&mut self) -> Result<bool> {
        match self.u8()? {
            ABSENT => Ok(false),
            PRESENT => Ok(true),
            other => Err(SealdraftError::Serialization(format!(
                "invalid presence byte {other}"
            ))),
        }
    }

    fn optional_u32(&mut self) -> Result<Option<u32>> {
        if self.presence()? {
            Ok(Some(self.u32()?))
        } else {
            Ok(None)
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(SealdraftError::Serialization(format!(
                "{} trailing bytes",
                self.bytes.len() - self.pos
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineup_roundtrip_with_all_fields() {
        let lineup = LineupSelection::dummy(5);
        let bytes = encode_lineup(&lineup);
        assert_eq!(decode_lineup(&bytes).unwrap(), lineup);
    }

    #[test]
    fn lineup_roundtrip_without_optionals() {
        let lineup = LineupSelection::new([10, 20, 30]);
        assert_eq!(decode_lineup(&encode_lineup(&lineup)).unwrap(), lineup);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = LineupSelection::dummy(5);
        let b = LineupSelection::dummy(5);
        assert_eq!(encode_lineup(&a), encode_lineup(&b));
    }

    #[test]
    fn absent_and_empty_positions_differ() {
        let absent = LineupSelection::new([1, 2]);
        let empty = LineupSelection::new([1, 2]).with_positions([]);
        assert_ne!(encode_lineup(&absent), encode_lineup(&empty));
    }

    #[test]
    fn captain_and_vice_are_not_interchangeable() {
        let a = LineupSelection::new([1, 2]).with_captain(1);
        let b = LineupSelection::new([1, 2]).with_vice_captain(1);
        assert_ne!(encode_lineup(&a), encode_lineup(&b));
    }

    #[test]
    fn fixed_width_little_endian_layout() {
        let lineup = LineupSelection::new([0x0102_0304]);
        let bytes = encode_lineup(&lineup);
        let body = &bytes[LINEUP_DOMAIN.len() + 1..];
        assert_eq!(body, &[1, 0, 0, 0, 4, 3, 2, 1, ABSENT, ABSENT, ABSENT]);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = encode_lineup(&LineupSelection::dummy(3));
        bytes.push(0);
        assert!(matches!(
            decode_lineup(&bytes),
            Err(SealdraftError::Serialization(_))
        ));
    }

    #[test]
    fn truncated_input_rejected() {
        let bytes = encode_lineup(&LineupSelection::dummy(3));
        assert!(decode_lineup(&bytes[..bytes.len() - 2]).is_err());
    }

    #[test]
    fn unknown_version_rejected() {
        let mut bytes = encode_lineup(&LineupSelection::dummy(3));
        bytes[LINEUP_DOMAIN.len()] = CODEC_VERSION + 1;
        let err = decode_lineup(&bytes).unwrap_err();
        assert!(format!("{err}").contains("version"), "Got: {err}");
    }

    #[test]
    fn bad_presence_byte_rejected() {
        let mut bytes = encode_lineup(&LineupSelection::new([1]));
        let last = bytes.len() - 1;
        bytes[last] = 7;
        assert!(decode_lineup(&bytes).is_err());
    }

    #[test]
    fn huge_length_prefix_rejected_without_allocating() {
        let mut bytes = LINEUP_DOMAIN.to_vec();
        bytes.push(CODEC_VERSION);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(decode_lineup(&bytes).is_err());
    }

    #[test]
    fn pick_is_not_a_lineup() {
        let pick = encode_pick(&PlayerSelection::new(4, 1));
        assert!(decode_lineup(&pick).is_err());
        assert_eq!(decode_pick(&pick).unwrap(), PlayerSelection::new(4, 1));
    }

    #[test]
    fn preimage_binds_salt_and_timestamp() {
        let lineup = LineupSelection::dummy(5);
        let salt_a = Salt::from_bytes([1u8; SALT_SIZE]);
        let salt_b = Salt::from_bytes([2u8; SALT_SIZE]);
        let base = commitment_preimage(&lineup, &salt_a, 1000);
        assert_ne!(base, commitment_preimage(&lineup, &salt_b, 1000));
        assert_ne!(base, commitment_preimage(&lineup, &salt_a, 1001));
        assert!(base.starts_with(COMMIT_DOMAIN));
        assert!(base.ends_with(&1000u64.to_le_bytes()));
    }
}
