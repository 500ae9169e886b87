use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use salescope_core::{DateRange, Order};
use tracing::warn;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Keep the completed orders whose creation time falls inside `range`.
///
/// The filter is stable: survivors keep their input order. A record with a
/// missing or unparseable `createdTime` is skipped with a warning; one bad
/// record never aborts the rest.
pub fn filter_orders<'a>(orders: &'a [Order], range: &DateRange) -> Vec<&'a Order> {
    if orders.is_empty() {
        return Vec::new();
    }

    let mut matched = Vec::new();
    for order in orders {
        if !order.is_completed() {
            continue;
        }

        let Some(raw) = order.created_time.as_deref() else {
            warn!(order_id = order.display_id(), "order has no createdTime, skipping");
            continue;
        };

        let Some(created) = parse_created_time(raw) else {
            warn!(
                order_id = order.display_id(),
                created_time = raw,
                "could not parse order createdTime, skipping"
            );
            continue;
        };

        if range.contains(created) {
            matched.push(order);
        }
    }

    matched
}

/// Permissive timezone-naive ISO-8601 parse: `T` or space separator,
/// optional fractional seconds, bare date taken as midnight.
fn parse_created_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use salescope_core::{DateRange, Order};
    use serde_json::json;

    use super::{filter_orders, parse_created_time};

    fn order(id: &str, state: &str, created_time: Option<&str>) -> Order {
        let mut raw = json!({"orderId": id, "state": state});
        if let Some(created) = created_time {
            raw["createdTime"] = json!(created);
        }
        serde_json::from_value(raw).expect("order fixture")
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn keeps_only_locked_orders_inside_the_range() {
        let orders = vec![
            order("o1", "locked", Some("2025-11-01T10:00:00")),
            order("o2", "pending", Some("2025-11-01T11:00:00")),
            order("o3", "locked", Some("2025-10-20T09:00:00")),
            order("o4", "locked", Some("2025-11-01T18:30:00")),
        ];
        let range = DateRange::single_day(day(2025, 11, 1));

        let matched = filter_orders(&orders, &range);
        let ids: Vec<_> = matched.iter().map(|o| o.display_id()).collect();
        assert_eq!(ids, vec!["o1", "o4"]);
    }

    #[test]
    fn end_of_day_boundary_is_inclusive_to_the_microsecond() {
        let orders = vec![
            order("at-end", "locked", Some("2025-11-01T23:59:59.999999")),
            order("past-end", "locked", Some("2025-11-02T00:00:00")),
        ];
        let range = DateRange::single_day(day(2025, 11, 1));

        let matched = filter_orders(&orders, &range);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].display_id(), "at-end");
    }

    #[test]
    fn missing_or_bad_timestamps_skip_the_record_only() {
        let orders = vec![
            order("no-time", "locked", None),
            order("garbled", "locked", Some("last tuesday-ish")),
            order("good", "locked", Some("2025-11-01T09:00:00")),
        ];
        let range = DateRange::single_day(day(2025, 11, 1));

        let matched = filter_orders(&orders, &range);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].display_id(), "good");
    }

    #[test]
    fn empty_input_is_an_empty_result() {
        let range = DateRange::single_day(day(2025, 11, 1));
        assert!(filter_orders(&[], &range).is_empty());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let orders = vec![order("o1", "locked", Some("2025-11-02T10:00:00"))];
        let range = DateRange::new(day(2025, 11, 3), day(2025, 11, 1));
        assert!(filter_orders(&orders, &range).is_empty());
    }

    #[test]
    fn parses_common_timestamp_shapes() {
        assert!(parse_created_time("2025-11-01T10:00:00").is_some());
        assert!(parse_created_time("2025-11-01 10:00:00").is_some());
        assert!(parse_created_time("2025-11-01T10:00:00.123456").is_some());
        assert!(parse_created_time("2025-11-01").is_some());
        assert!(parse_created_time("not a time").is_none());
    }
}
