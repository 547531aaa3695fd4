//! Opaque pagination cursors.
//!
//! A cursor names a resume position in the `(created_at, uuid)` descending
//! ordering used by paginated listings. Tokens are a fixed 29 byte layout
//! rendered as unpadded URL-safe base64:
//!
//! | bytes    | content                                   |
//! |----------|-------------------------------------------|
//! | `0`      | format version (`1`)                      |
//! | `1..9`   | seconds since the Unix epoch, `i64` BE    |
//! | `9..13`  | sub-second nanoseconds, `i32` BE          |
//! | `13..29` | record UUID                               |
//!
//! Decoding is pure parsing and never consults storage. It does reject
//! timestamps earlier than the store can hold, so such a token fails as a bad
//! cursor instead of as a storage error.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

const CURSOR_VERSION: u8 = 1;

const CURSOR_LEN: usize = 29;

/// `-004712-01-01T00:00:00Z`, the first whole year `timestamptz` accepts.
const EARLIEST_STORABLE: Timestamp = Timestamp::constant(-210_863_606_400, 0);

/// Resume position in a `(created_at, uuid)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Creation time of the last record seen.
    pub created_at: Timestamp,

    /// Identifier of the last record seen.
    pub uuid: Uuid,
}

/// Why a token could not be decoded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// Not canonical unpadded URL-safe base64.
    #[error("cursor is not valid base64")]
    InvalidEncoding,

    /// Decoded to something other than 29 bytes.
    #[error("cursor has an unexpected length")]
    InvalidLength,

    /// Leading version byte is not one this build writes.
    #[error("cursor uses an unsupported version")]
    UnsupportedVersion,

    /// Seconds or nanoseconds outside the range a wallet can be created in.
    #[error("cursor timestamp is out of range")]
    InvalidTimestamp,
}

impl Cursor {
    /// Resume position just after the record created at `created_at` with `uuid`.
    #[must_use]
    pub const fn new(created_at: Timestamp, uuid: Uuid) -> Self {
        Self { created_at, uuid }
    }

    /// Sentinel for the beginning of a sequence.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(Timestamp::UNIX_EPOCH, Uuid::nil())
    }

    /// A nil record identifier marks the start of a sequence, whatever the timestamp.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        self.uuid.is_nil()
    }

    /// Render the opaque token handed to clients.
    ///
    /// Equal cursors always produce the same token.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(CURSOR_LEN);

        bytes.push(CURSOR_VERSION);
        bytes.extend_from_slice(&self.created_at.as_second().to_be_bytes());
        bytes.extend_from_slice(&self.created_at.subsec_nanosecond().to_be_bytes());
        bytes.extend_from_slice(self.uuid.as_bytes());

        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Parse a token produced by [`Cursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not canonical unpadded URL-safe base64,
    /// is truncated or overlong, carries an unknown version, or holds a timestamp
    /// outside the supported range.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_ignored| CursorError::InvalidEncoding)?;

        if bytes.len() != CURSOR_LEN {
            return Err(CursorError::InvalidLength);
        }

        let (version, rest) = bytes.split_first().ok_or(CursorError::InvalidLength)?;

        if *version != CURSOR_VERSION {
            return Err(CursorError::UnsupportedVersion);
        }

        let (seconds, rest) = rest
            .split_first_chunk::<8>()
            .ok_or(CursorError::InvalidLength)?;

        let (nanoseconds, uuid) = rest
            .split_first_chunk::<4>()
            .ok_or(CursorError::InvalidLength)?;

        let created_at = Timestamp::new(
            i64::from_be_bytes(*seconds),
            i32::from_be_bytes(*nanoseconds),
        )
        .map_err(|_ignored| CursorError::InvalidTimestamp)?;

        if created_at < EARLIEST_STORABLE {
            return Err(CursorError::InvalidTimestamp);
        }

        let uuid = Uuid::from_slice(uuid).map_err(|_ignored| CursorError::InvalidLength)?;

        Ok(Self { created_at, uuid })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sample() -> TestResult<Cursor> {
        Ok(Cursor::new(
            "2026-03-14T15:09:26.535897932Z".parse()?,
            "0195a4b2-7c1e-7d40-9a3f-2b8c1d0e9f11".parse()?,
        ))
    }

    #[test]
    fn round_trip_preserves_nanoseconds() -> TestResult {
        let cursor = sample()?;

        let decoded = Cursor::decode(&cursor.encode())?;

        assert_eq!(decoded, cursor);
        assert_eq!(decoded.created_at.subsec_nanosecond(), 535_897_932);

        Ok(())
    }

    #[test]
    fn round_trip_before_epoch() -> TestResult {
        let cursor = Cursor::new("1969-07-20T20:17:40.25Z".parse()?, Uuid::now_v7());

        assert_eq!(Cursor::decode(&cursor.encode())?, cursor);

        Ok(())
    }

    #[test]
    fn encoding_is_deterministic_and_url_safe() -> TestResult {
        let cursor = sample()?;
        let token = cursor.encode();

        assert_eq!(token, cursor.encode(), "encoding must be stable");
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token {token} must only use URL-safe characters"
        );

        Ok(())
    }

    #[test]
    fn start_sentinel_round_trips() -> TestResult {
        let decoded = Cursor::decode(&Cursor::start().encode())?;

        assert!(decoded.is_start(), "nil uuid should mark the start");

        Ok(())
    }

    #[test]
    fn any_nil_uuid_is_a_start_cursor() -> TestResult {
        let cursor = Cursor::new("2026-01-01T00:00:00Z".parse()?, Uuid::nil());

        assert!(cursor.is_start(), "nil uuid should mark the start");
        assert!(!sample()?.is_start(), "non-nil uuid is a resume position");

        Ok(())
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(
            Cursor::decode("not a cursor!"),
            Err(CursorError::InvalidEncoding)
        );
    }

    #[test]
    fn decode_rejects_empty_token() {
        assert_eq!(Cursor::decode(""), Err(CursorError::InvalidLength));
    }

    #[test]
    fn decode_rejects_truncated_token() -> TestResult {
        let token = sample()?.encode();
        let truncated: String = token.chars().take(token.len() - 4).collect();

        assert!(Cursor::decode(&truncated).is_err(), "truncated token");

        Ok(())
    }

    #[test]
    fn decode_rejects_padded_token() -> TestResult {
        let token = format!("{}=", sample()?.encode());

        assert_eq!(Cursor::decode(&token), Err(CursorError::InvalidEncoding));

        Ok(())
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let mut bytes = vec![2_u8];

        bytes.extend_from_slice(&[0; CURSOR_LEN - 1]);

        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode(bytes)),
            Err(CursorError::UnsupportedVersion)
        );
    }

    #[test]
    fn decode_rejects_out_of_range_timestamp() {
        let mut bytes = vec![CURSOR_VERSION];

        bytes.extend_from_slice(&i64::MAX.to_be_bytes());
        bytes.extend_from_slice(&0_i32.to_be_bytes());
        bytes.extend_from_slice(Uuid::now_v7().as_bytes());

        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode(bytes)),
            Err(CursorError::InvalidTimestamp)
        );
    }

    #[test]
    fn decode_rejects_timestamp_before_store_range() -> TestResult {
        let cursor = Cursor::new("-009000-01-01T00:00:00Z".parse()?, Uuid::now_v7());

        assert_eq!(
            Cursor::decode(&cursor.encode()),
            Err(CursorError::InvalidTimestamp)
        );

        Ok(())
    }

    #[test]
    fn decode_accepts_earliest_storable_timestamp() -> TestResult {
        let earliest: Timestamp = "-004712-01-01T00:00:00Z".parse()?;

        assert_eq!(earliest, EARLIEST_STORABLE, "constant must match its comment");

        let cursor = Cursor::new(earliest, Uuid::now_v7());

        assert_eq!(Cursor::decode(&cursor.encode())?, cursor);

        Ok(())
    }

    #[test]
    fn decode_rejects_trailing_bytes() -> TestResult {
        let mut bytes = URL_SAFE_NO_PAD.decode(sample()?.encode())?;

        bytes.push(0);

        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode(bytes)),
            Err(CursorError::InvalidLength)
        );

        Ok(())
    }
}
