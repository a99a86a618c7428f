//! Display order for saved trips.

use crate::domain::{DateWindow, Trip};

/// Order trips for display.
///
/// Trips are sorted by departure date, then every trip whose departure has
/// passed is moved to the end. Both the upcoming and the expired group stay
/// in date order, and trips sharing a date keep their input order.
pub fn order_for_display(mut trips: Vec<Trip>, window: &DateWindow) -> Vec<Trip> {
    // Stable sort, then a stable partition: the order matters
    trips.sort_by_key(|t| t.departure_info.date);

    let (mut upcoming, expired): (Vec<Trip>, Vec<Trip>) = trips
        .into_iter()
        .partition(|t| !window.is_expired(t.departure_info.date));

    upcoming.extend(expired);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationInfo, TripId, parse_date_string};
    use proptest::prelude::*;

    fn window() -> DateWindow {
        DateWindow::at(parse_date_string("2021-12-15").unwrap())
    }

    fn trip(id: i64, departure: &str) -> Trip {
        let date = parse_date_string(departure).unwrap();
        Trip::new(id, LocationInfo::new("City", "Country", 0.0, 0.0), date, date)
    }

    fn departures(trips: &[Trip]) -> Vec<String> {
        trips
            .iter()
            .map(|t| t.departure_info.date.to_string())
            .collect()
    }

    #[test]
    fn expired_trips_move_to_the_end() {
        let trips = vec![
            trip(1, "2021-12-20"),
            trip(2, "2021-12-10"),
            trip(3, "2021-12-25"),
        ];

        let ordered = order_for_display(trips, &window());
        assert_eq!(
            departures(&ordered),
            vec!["2021-12-20", "2021-12-25", "2021-12-10"]
        );
    }

    #[test]
    fn expired_tail_is_oldest_first() {
        let trips = vec![
            trip(1, "2021-12-14"),
            trip(2, "2022-01-02"),
            trip(3, "2021-11-30"),
            trip(4, "2021-12-15"),
        ];

        let ordered = order_for_display(trips, &window());
        assert_eq!(
            departures(&ordered),
            vec!["2021-12-15", "2022-01-02", "2021-11-30", "2021-12-14"]
        );
    }

    #[test]
    fn same_day_keeps_input_order() {
        let trips = vec![trip(1, "2021-12-20"), trip(2, "2021-12-18"), trip(3, "2021-12-20")];

        let ordered = order_for_display(trips, &window());
        let ids: Vec<_> = ordered.iter().map(|t| t.id.clone()).collect();
        assert_eq!(
            ids,
            vec![TripId::Number(2), TripId::Number(1), TripId::Number(3)]
        );
    }

    #[test]
    fn empty_list() {
        assert!(order_for_display(vec![], &window()).is_empty());
    }

    proptest! {
        #[test]
        fn ordering_is_idempotent(offsets in prop::collection::vec(-40i64..40, 0..30)) {
            let today = window().current_date();
            let trips: Vec<Trip> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| {
                    let date = today + chrono::Duration::days(*off);
                    Trip::new(i as i64, LocationInfo::new("C", "K", 0.0, 0.0), date, date)
                })
                .collect();

            let once = order_for_display(trips, &window());
            let twice = order_for_display(once.clone(), &window());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn upcoming_never_follow_expired(offsets in prop::collection::vec(-40i64..40, 0..30)) {
            let w = window();
            let trips: Vec<Trip> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| {
                    let date = w.current_date() + chrono::Duration::days(*off);
                    Trip::new(i as i64, LocationInfo::new("C", "K", 0.0, 0.0), date, date)
                })
                .collect();

            let ordered = order_for_display(trips, &w);
            let flags: Vec<bool> = ordered.iter().map(|t| w.is_expired(t.departure_info.date)).collect();
            let first_expired = flags.iter().position(|e| *e).unwrap_or(flags.len());
            prop_assert!(flags[first_expired..].iter().all(|e| *e));

            for group in [&ordered[..first_expired], &ordered[first_expired..]] {
                prop_assert!(group.windows(2).all(|p| p[0].departure_info.date <= p[1].departure_info.date));
            }
        }
    }
}
