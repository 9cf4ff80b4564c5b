use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-native point in time: microseconds since the Unix epoch, UTC.
///
/// Models keep `chrono` types; conversion happens when a record is turned
/// into a [`Document`](crate::Document) and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
	pub fn now() -> Self {
		Self::from_datetime(Utc::now())
	}

	pub fn from_micros(micros: i64) -> Self {
		Self(micros)
	}

	pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
		Self(datetime.timestamp_micros())
	}

	/// `None` when the value lies outside chrono's representable range
	pub fn to_datetime(self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp_micros(self.0)
	}

	/// Calendar dates are stored at 00:00 UTC
	///
	/// # Examples
	///
	/// ```
	/// use chrono::NaiveDate;
	/// use upow_db::Timestamp;
	///
	/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
	/// assert_eq!(Timestamp::from_date(date).to_date(), Some(date));
	/// ```
	pub fn from_date(date: NaiveDate) -> Self {
		Self::from_datetime(date.and_time(chrono::NaiveTime::MIN).and_utc())
	}

	pub fn to_date(self) -> Option<NaiveDate> {
		self.to_datetime().map(|datetime| datetime.date_naive())
	}
}

impl From<DateTime<Utc>> for Timestamp {
	fn from(datetime: DateTime<Utc>) -> Self {
		Self::from_datetime(datetime)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_datetime_roundtrip_keeps_microseconds() {
		let datetime = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 10).unwrap()
			+ chrono::Duration::microseconds(123_456);

		assert_eq!(Timestamp::from_datetime(datetime).to_datetime(), Some(datetime));
	}

	#[test]
	fn test_serializes_as_plain_integer() {
		let json = serde_json::to_value(Timestamp::from_micros(1_700_000_000_000_000)).unwrap();
		assert_eq!(json, serde_json::json!(1_700_000_000_000_000i64));
	}

	#[test]
	fn test_out_of_range_has_no_datetime() {
		assert_eq!(Timestamp::from_micros(i64::MAX).to_datetime(), None);
	}

	#[test]
	fn test_dates_order_like_timestamps() {
		let earlier = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
		let later = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

		assert!(Timestamp::from_date(earlier) < Timestamp::from_date(later));
	}
}
