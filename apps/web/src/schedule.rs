/// Multiples of the interval after which an unanswered fetch is written off.
const ABANDON_AFTER_INTERVALS: f64 = 2.0;

/// Decides, frame by frame, when the next readings fetch starts.
///
/// The browser has no timer we own between frames, so the draw loop asks
/// [`PollSchedule::poll_due`] with the current clock on every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollSchedule {
    last_started: Option<f64>,
    in_flight: Option<u64>,
    issued: u64,
}

impl PollSchedule {
    /// Returns a ticket when a fetch should start now; the schedule counts it
    /// as in flight until [`finish`](Self::finish) gets that ticket back. The
    /// first call is always due. A tick that comes while a fetch is still
    /// running is skipped, unless that fetch has been silent for
    /// [`ABANDON_AFTER_INTERVALS`] intervals.
    pub fn poll_due(&mut self, now_seconds: f64, interval_seconds: f64) -> Option<u64> {
        if let (Some(_), Some(last)) = (self.in_flight, self.last_started) {
            let age = now_seconds - last;
            if (0.0..interval_seconds * ABANDON_AFTER_INTERVALS).contains(&age) {
                return None;
            }
            self.in_flight = None;
        }

        let due = self
            .last_started
            .map_or(true, |last| now_seconds - last >= interval_seconds || now_seconds < last);
        if !due {
            return None;
        }

        self.issued += 1;
        self.last_started = Some(now_seconds);
        self.in_flight = Some(self.issued);
        Some(self.issued)
    }

    /// Settles the fetch behind `ticket`. Returns `false` for a fetch that was
    /// already written off, whose result should be dropped.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub const fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::PollSchedule;

    const INTERVAL: f64 = 30.0;

    #[test]
    fn first_frame_starts_a_fetch() {
        let mut schedule = PollSchedule::default();
        assert!(schedule.poll_due(5.0, INTERVAL).is_some());
        assert!(schedule.in_flight());
    }

    #[test]
    fn next_fetch_waits_for_the_interval() {
        let mut schedule = PollSchedule::default();
        let ticket = schedule.poll_due(0.0, INTERVAL).unwrap();
        assert!(schedule.finish(ticket));

        assert_eq!(schedule.poll_due(29.9, INTERVAL), None);
        assert!(schedule.poll_due(30.0, INTERVAL).is_some());
    }

    #[test]
    fn slow_fetch_skips_ticks() {
        let mut schedule = PollSchedule::default();
        let ticket = schedule.poll_due(0.0, INTERVAL).unwrap();

        assert_eq!(schedule.poll_due(30.0, INTERVAL), None);
        assert_eq!(schedule.poll_due(45.0, INTERVAL), None);

        assert!(schedule.finish(ticket));
        assert!(schedule.poll_due(45.0, INTERVAL).is_some());
    }

    #[test]
    fn hung_fetch_does_not_stop_polling() {
        let mut schedule = PollSchedule::default();
        schedule.poll_due(0.0, INTERVAL).unwrap();

        let fired = (1..=1000)
            .filter(|tick| schedule.poll_due(f64::from(*tick) * INTERVAL, INTERVAL).is_some())
            .count();

        // Every second tick writes off the silent fetch and starts a new one.
        assert_eq!(fired, 500);
    }

    #[test]
    fn late_answer_from_a_written_off_fetch_is_dropped() {
        let mut schedule = PollSchedule::default();
        let hung = schedule.poll_due(0.0, INTERVAL).unwrap();
        let fresh = schedule.poll_due(60.0, INTERVAL).unwrap();

        assert!(!schedule.finish(hung));
        assert!(schedule.in_flight());
        assert!(schedule.finish(fresh));
        assert!(!schedule.in_flight());
    }

    #[test]
    fn clock_going_backwards_restarts_the_cycle() {
        let mut schedule = PollSchedule::default();
        let ticket = schedule.poll_due(100.0, INTERVAL).unwrap();
        schedule.finish(ticket);

        assert!(schedule.poll_due(10.0, INTERVAL).is_some());
    }
}
