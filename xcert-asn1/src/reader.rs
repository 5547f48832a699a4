// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! The tag reader (spec §4.A).
//!
//! A minimal DER cursor over a borrowed byte slice. Every reader here advances
//! the caller-held [`Cursor`] and returns a slice borrowed from the original
//! buffer -- nothing here allocates or copies payload bytes, matching the
//! "frame of spans" data model (spec §3).

use crate::error::{Error, ErrorKind, Result};

pub const TAG_BOOLEAN: u8 = 0x01;
pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_BIT_STRING: u8 = 0x03;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_NULL: u8 = 0x05;
pub const TAG_OID: u8 = 0x06;
pub const TAG_UTF8_STRING: u8 = 0x0c;
pub const TAG_SEQUENCE: u8 = 0x30;
pub const TAG_SET: u8 = 0x31;
pub const TAG_PRINTABLE_STRING: u8 = 0x13;
pub const TAG_IA5_STRING: u8 = 0x16;
pub const TAG_UTC_TIME: u8 = 0x17;
pub const TAG_GENERALIZED_TIME: u8 = 0x18;

/// A filter over a `(class, constructed, tag_number)` triple, used by
/// [`Cursor::sequence_of`] to validate each element's tag before dispatch.
///
/// Mirrors spec §4.A's `(class_mask, class_value, value_mask, value_value)`
/// filter, collapsed to the single byte that DER uses for low tag numbers
/// (every tag this decoder cares about is below 31).
pub struct TagFilter {
    pub mask: u8,
    pub value: u8,
}

impl TagFilter {
    pub const fn exact(tag: u8) -> Self {
        TagFilter {
            mask: 0xff,
            value: tag,
        }
    }

    pub const fn any_context_primitive_or_constructed(number: u8) -> Self {
        // Context-specific class (bits 8-7 = 10), tag number in bits 5-1;
        // the constructed bit (bit 6) is masked out so either form matches.
        TagFilter {
            mask: 0b1101_1111,
            value: 0b1000_0000 | (number & 0x1f),
        }
    }

    fn matches(&self, tag: u8) -> bool {
        tag & self.mask == self.value
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The byte offset of the cursor within the buffer it was constructed
    /// over -- used by the frame parser to assert exact consumption.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek_byte(&self) -> Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| Error::new(ErrorKind::OutOfData, "peek_byte"))
    }

    /// Reads one raw tag/length/value triple, returning `(tag, content)`
    /// and advancing past the whole TLV. Rejects indefinite length (BER-only)
    /// and length-overflow encodings.
    pub fn read_tlv(&mut self) -> Result<(u8, &'a [u8])> {
        let tag = self.peek_byte()?;
        let mut idx = self.pos + 1;
        let first_len = *self
            .data
            .get(idx)
            .ok_or_else(|| Error::new(ErrorKind::OutOfData, "read_tlv length"))?;
        idx += 1;

        let len: usize = if first_len & 0x80 == 0 {
            first_len as usize
        } else {
            let nbytes = (first_len & 0x7f) as usize;
            if nbytes == 0 {
                // Indefinite length (BER); DER forbids it.
                return Err(Error::new(ErrorKind::InvalidLength, "indefinite length"));
            }
            if nbytes > std::mem::size_of::<usize>() {
                return Err(Error::new(ErrorKind::InvalidLength, "length overflow"));
            }
            let bytes = self
                .data
                .get(idx..idx + nbytes)
                .ok_or_else(|| Error::new(ErrorKind::OutOfData, "long length bytes"))?;
            idx += nbytes;
            let mut acc: usize = 0;
            for b in bytes {
                acc = acc
                    .checked_shl(8)
                    .and_then(|v| v.checked_add(*b as usize))
                    .ok_or_else(|| Error::new(ErrorKind::InvalidLength, "length overflow"))?;
            }
            // Reject non-minimal long-form length encodings (e.g. 0x81 0x05
            // where the short form would have sufficed).
            if acc < 0x80 {
                return Err(Error::new(ErrorKind::InvalidLength, "non-minimal length"));
            }
            acc
        };

        let content = self
            .data
            .get(idx..idx + len)
            .ok_or_else(|| Error::new(ErrorKind::OutOfData, "content"))?;
        self.pos = idx + len;
        Ok((tag, content))
    }

    /// Reads a TLV whose tag must equal `expected_tag` exactly; returns its
    /// content span. An unexpected tag is `UNEXPECTED_TAG`, never silently
    /// skipped.
    pub fn get_tag(&mut self, expected_tag: u8) -> Result<&'a [u8]> {
        let save = *self;
        let (tag, content) = self.read_tlv()?;
        if tag != expected_tag {
            *self = save;
            return Err(Error::new(ErrorKind::UnexpectedTag, "get_tag"));
        }
        Ok(content)
    }

    /// Like [`Cursor::get_tag`], but returns the whole encoded TLV (tag,
    /// length, and content bytes) rather than just the content. Used to hand
    /// a self-contained encoding off to a typed `asn1` sub-decoder (e.g.
    /// `AlgorithmIdentifier`) without re-encoding it.
    pub fn get_tag_full(&mut self, expected_tag: u8) -> Result<&'a [u8]> {
        let start = self.pos;
        self.get_tag(expected_tag)?;
        Ok(&self.data[start..self.pos])
    }

    /// Reads the next TLV regardless of tag, returning the whole encoding
    /// (tag, length, and content bytes together).
    pub fn read_tlv_full(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        self.read_tlv()?;
        Ok(&self.data[start..self.pos])
    }

    /// Reads a TLV only if its tag matches `expected_tag`; otherwise rewinds
    /// and returns `None` without consuming input. Used for `OPTIONAL` and
    /// `DEFAULT` fields (e.g. the explicit `[0] Version`).
    pub fn get_optional_tag(&mut self, expected_tag: u8) -> Option<&'a [u8]> {
        if self.is_empty() {
            return None;
        }
        let save = *self;
        match self.read_tlv() {
            Ok((tag, content)) if tag == expected_tag => Some(content),
            _ => {
                *self = save;
                None
            }
        }
    }

    pub fn get_bool(&mut self) -> Result<bool> {
        let content = self.get_tag(TAG_BOOLEAN)?;
        if content.len() != 1 {
            return Err(Error::new(ErrorKind::InvalidLength, "get_bool"));
        }
        Ok(content[0] != 0)
    }

    /// Returns the raw big-endian two's-complement bytes of an INTEGER, with
    /// DER minimal-encoding validated. Used for serial numbers and other
    /// integers that are exposed as spans rather than scalars.
    pub fn get_int_bytes(&mut self) -> Result<&'a [u8]> {
        let content = self.get_tag(TAG_INTEGER)?;
        if content.is_empty() {
            return Err(Error::new(ErrorKind::InvalidLength, "get_int_bytes"));
        }
        if content.len() > 1 {
            let redundant_zero = content[0] == 0x00 && content[1] & 0x80 == 0;
            let redundant_ff = content[0] == 0xff && content[1] & 0x80 != 0;
            if redundant_zero || redundant_ff {
                return Err(Error::new(ErrorKind::InvalidFormat, "non-minimal integer"));
            }
        }
        Ok(content)
    }

    /// Decodes a small non-negative INTEGER (version numbers, path lengths)
    /// into a `u64`. Overflow of the accumulator is rejected rather than
    /// wrapped.
    pub fn get_small_uint(&mut self) -> Result<u64> {
        let bytes = self.get_int_bytes()?;
        if bytes[0] & 0x80 != 0 {
            return Err(Error::new(ErrorKind::InvalidFormat, "negative integer"));
        }
        if bytes.len() > 8 {
            return Err(Error::new(ErrorKind::InvalidLength, "integer too large"));
        }
        let mut acc: u64 = 0;
        for b in bytes {
            acc = acc
                .checked_shl(8)
                .and_then(|v| v.checked_add(*b as u64))
                .ok_or_else(|| Error::new(ErrorKind::InvalidLength, "integer overflow"))?;
        }
        Ok(acc)
    }

    /// Returns `(unused_bits, bytes)` for a BIT STRING.
    pub fn get_bitstring(&mut self) -> Result<(u8, &'a [u8])> {
        let content = self.get_tag(TAG_BIT_STRING)?;
        let (unused, bytes) = content
            .split_first()
            .ok_or_else(|| Error::new(ErrorKind::InvalidLength, "empty bit string"))?;
        if *unused > 7 || (bytes.is_empty() && *unused != 0) {
            return Err(Error::new(ErrorKind::InvalidFormat, "bad unused-bit count"));
        }
        Ok((*unused, bytes))
    }

    pub fn get_oid(&mut self) -> Result<&'a [u8]> {
        let content = self.get_tag(TAG_OID)?;
        if content.is_empty() {
            return Err(Error::new(ErrorKind::InvalidFormat, "empty oid"));
        }
        Ok(content)
    }

    /// Reads a `UTCTime` or `GeneralizedTime` into a calendar tuple
    /// `(year, month, day, hour, minute, second)`. Both encodings are
    /// constrained to the `Z`-suffixed UTC form; fractional seconds and
    /// explicit offsets are rejected as `INVALID_DATE`.
    pub fn get_time(&mut self) -> Result<CalendarTime> {
        let save = *self;
        if let Ok((tag, content)) = self.read_tlv() {
            match tag {
                TAG_UTC_TIME => return parse_utc_time(content),
                TAG_GENERALIZED_TIME => return parse_generalized_time(content),
                _ => {}
            }
        }
        *self = save;
        Err(Error::new(ErrorKind::UnexpectedTag, "get_time"))
    }

    /// Generic `SEQUENCE OF X` traversal: `content` holds the full body of
    /// the outer SEQUENCE. `callback` is invoked once per element with a
    /// cursor scoped to that element's TLV; `filter` constrains the
    /// element's outer tag.
    pub fn sequence_of(
        content: &'a [u8],
        filter: &TagFilter,
        mut callback: impl FnMut(u8, &'a [u8]) -> Result<()>,
    ) -> Result<()> {
        let mut cur = Cursor::new(content);
        while !cur.is_empty() {
            let (tag, elem) = cur.read_tlv()?;
            if !filter.matches(tag) {
                return Err(Error::new(ErrorKind::UnexpectedTag, "sequence_of element"));
            }
            callback(tag, elem)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

fn parse_digits(s: &[u8]) -> Option<u32> {
    if s.is_empty() || !s.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(s).ok()?.parse().ok()
}

fn parse_utc_time(content: &[u8]) -> Result<CalendarTime> {
    // YYMMDDHHMMSSZ (13 bytes); two-digit year is rebased per X.509 (>= 50 =>
    // 19xx, < 50 => 20xx).
    let s = content;
    if s.len() != 13 || s[12] != b'Z' {
        return Err(Error::new(ErrorKind::InvalidDate, "utc time format"));
    }
    let yy = parse_digits(&s[0..2]).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "utc yy"))?;
    let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
    build_calendar_time(
        year as u16,
        &s[2..4],
        &s[4..6],
        &s[6..8],
        &s[8..10],
        &s[10..12],
    )
}

fn parse_generalized_time(content: &[u8]) -> Result<CalendarTime> {
    // YYYYMMDDHHMMSSZ (15 bytes); no fractional seconds permitted.
    let s = content;
    if s.len() != 15 || s[14] != b'Z' {
        return Err(Error::new(ErrorKind::InvalidDate, "generalized time format"));
    }
    let year =
        parse_digits(&s[0..4]).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "gt year"))?;
    build_calendar_time(
        year as u16,
        &s[4..6],
        &s[6..8],
        &s[8..10],
        &s[10..12],
        &s[12..14],
    )
}

fn build_calendar_time(
    year: u16,
    month: &[u8],
    day: &[u8],
    hour: &[u8],
    minute: &[u8],
    second: &[u8],
) -> Result<CalendarTime> {
    let month = parse_digits(month).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "month"))?;
    let day = parse_digits(day).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "day"))?;
    let hour = parse_digits(hour).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "hour"))?;
    let minute =
        parse_digits(minute).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "minute"))?;
    let second =
        parse_digits(second).ok_or_else(|| Error::new(ErrorKind::InvalidDate, "second"))?;
    if !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || hour > 23
        || minute > 59
        || second > 60
    {
        return Err(Error::new(ErrorKind::InvalidDate, "out-of-range field"));
    }
    Ok(CalendarTime {
        year,
        month: month as u8,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tlv_short_form() {
        let mut c = Cursor::new(&[0x02, 0x01, 0x05, 0xff]);
        let (tag, content) = c.read_tlv().unwrap();
        assert_eq!(tag, TAG_INTEGER);
        assert_eq!(content, &[0x05]);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn test_read_tlv_long_form() {
        let mut data = vec![0x04, 0x81, 0x80];
        data.extend(std::iter::repeat(0x41).take(128));
        let mut c = Cursor::new(&data);
        let (tag, content) = c.read_tlv().unwrap();
        assert_eq!(tag, TAG_OCTET_STRING);
        assert_eq!(content.len(), 128);
    }

    #[test]
    fn test_non_minimal_long_form_rejected() {
        // Length 5 encoded with the long form when the short form applies.
        let data = [0x04, 0x81, 0x05, 1, 2, 3, 4, 5];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_tlv().unwrap_err().kind, ErrorKind::InvalidLength);
    }

    #[test]
    fn test_indefinite_length_rejected() {
        let data = [0x30, 0x80, 0x00, 0x00];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_tlv().unwrap_err().kind, ErrorKind::InvalidLength);
    }

    #[test]
    fn test_out_of_data() {
        let data = [0x02, 0x05, 0x01];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_tlv().unwrap_err().kind, ErrorKind::OutOfData);
    }

    #[test]
    fn test_get_tag_unexpected_rewinds() {
        let data = [0x02, 0x01, 0x01];
        let mut c = Cursor::new(&data);
        assert_eq!(
            c.get_tag(TAG_BOOLEAN).unwrap_err().kind,
            ErrorKind::UnexpectedTag
        );
        // Cursor position must be unchanged so the caller can retry as
        // optional.
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_get_bool() {
        let data = [0x01, 0x01, 0xff];
        let mut c = Cursor::new(&data);
        assert!(c.get_bool().unwrap());
    }

    #[test]
    fn test_get_small_uint_overflow() {
        let mut data = vec![0x02, 9];
        data.extend(std::iter::repeat(0xff).take(9));
        let mut c = Cursor::new(&data);
        assert_eq!(
            c.get_small_uint().unwrap_err().kind,
            ErrorKind::InvalidLength
        );
    }

    #[test]
    fn test_utc_time_rebase() {
        let mut c = Cursor::new(b"\x17\x0d250101000000Z");
        let t = c.get_time().unwrap();
        assert_eq!(t.year, 2025);
        let mut c2 = Cursor::new(b"\x17\x0d700101000000Z");
        let t2 = c2.get_time().unwrap();
        assert_eq!(t2.year, 1970);
    }

    #[test]
    fn test_generalized_time() {
        let mut c = Cursor::new(b"\x18\x0f20500101000000Z");
        let t = c.get_time().unwrap();
        assert_eq!(t.year, 2050);
    }

    #[test]
    fn test_sequence_of_enforces_filter() {
        // SEQUENCE OF INTEGER containing a BOOLEAN -- must fail.
        let data = [0x01, 0x01, 0x00];
        let filter = TagFilter::exact(TAG_INTEGER);
        let result = Cursor::sequence_of(&data, &filter, |_, _| Ok(()));
        assert_eq!(result.unwrap_err().kind, ErrorKind::UnexpectedTag);
    }
}
