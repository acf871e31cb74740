use crate::prelude::*;

/// result of a single [`FrameStableClock::tick`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// one or more frames were consumed
    Advanced { frames: usize },
    /// there is data, but its not time to show it yet
    Waiting,
    /// nothing left to consume, time is being held
    Starved,
}

/// playback clock which only ever lands on times we actually have frames for.
///
/// real time is only accumulated while there is something to consume, so a
/// starved clock doesn't build up a backlog it would then race through once
/// frames arrive again.
#[derive(Debug)]
pub struct FrameStableClock {
    /// time of the last consumed frame
    current_time: f64,
    /// how far real time says playback should be.
    /// starts at the first frame we see, so joining mid-session plays from there instead of from 0
    playback_time: Option<f64>,
}
impl FrameStableClock {
    pub fn new(start_time: f64) -> Self {
        Self {
            current_time: start_time,
            playback_time: None,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// has this clock consumed anything yet?
    pub fn started(&self) -> bool {
        self.playback_time.is_some()
    }

    pub fn tick(&mut self, buffer: &mut FrameBuffer, elapsed: f64) -> ClockTick {
        let Some(next) = buffer.peek_next() else { return ClockTick::Starved };

        let playback_time = match self.playback_time {
            Some(time) => time + elapsed.max(0.0),
            None => next.time,
        };
        self.playback_time = Some(playback_time);

        let mut frames = 0;
        while let Some(next) = buffer.peek_next() {
            if next.time > playback_time { break }

            // time never goes backwards, even if the host's timestamps do
            self.current_time = self.current_time.max(next.time);
            buffer.advance();
            frames += 1;
        }

        if frames > 0 {
            ClockTick::Advanced { frames }
        } else {
            ClockTick::Waiting
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(times: &[f64]) -> FrameBuffer {
        let mut buffer = FrameBuffer::new();
        for (i, time) in times.iter().enumerate() {
            buffer.append(Frame::new(i as u32, *time, ReplayAction::MousePos { x: 0.0, y: 0.0 })).unwrap();
        }
        buffer
    }

    #[test]
    fn holds_start_time_until_first_frame() {
        let mut buffer = FrameBuffer::new();
        let mut clock = FrameStableClock::new(-100.0);

        assert_eq!(clock.tick(&mut buffer, 16.0), ClockTick::Starved);
        assert_eq!(clock.current_time(), -100.0);
        assert!(!clock.started());
    }

    #[test]
    fn advances_one_frame_per_interval() {
        let mut buffer = buffer_with(&[0.0, 100.0, 200.0]);
        let mut clock = FrameStableClock::new(0.0);

        assert_eq!(clock.tick(&mut buffer, 100.0), ClockTick::Advanced { frames: 1 });
        assert_eq!(clock.current_time(), 0.0);

        assert_eq!(clock.tick(&mut buffer, 50.0), ClockTick::Waiting);
        assert_eq!(clock.current_time(), 0.0);

        assert_eq!(clock.tick(&mut buffer, 50.0), ClockTick::Advanced { frames: 1 });
        assert_eq!(clock.current_time(), 100.0);

        assert_eq!(clock.tick(&mut buffer, 100.0), ClockTick::Advanced { frames: 1 });
        assert_eq!(clock.current_time(), 200.0);
    }

    #[test]
    fn large_ticks_consume_everything_due() {
        let mut buffer = buffer_with(&[0.0, 100.0, 200.0, 300.0]);
        let mut clock = FrameStableClock::new(0.0);

        clock.tick(&mut buffer, 0.0);
        assert_eq!(clock.tick(&mut buffer, 250.0), ClockTick::Advanced { frames: 2 });
        assert_eq!(clock.current_time(), 200.0);
        assert_eq!(buffer.pending(), 1);
    }

    #[test]
    fn starved_ticks_are_idempotent() {
        let mut buffer = buffer_with(&[0.0, 100.0]);
        let mut clock = FrameStableClock::new(0.0);
        clock.tick(&mut buffer, 0.0);
        clock.tick(&mut buffer, 100.0);

        for _ in 0..10 {
            assert_eq!(clock.tick(&mut buffer, 1000.0), ClockTick::Starved);
            assert_eq!(clock.current_time(), 100.0);
        }

        // starving didn't bank any time, the next frame still needs its full interval
        buffer.append(Frame::new(2, 200.0, ReplayAction::Release { key: 1 })).unwrap();
        assert_eq!(clock.tick(&mut buffer, 50.0), ClockTick::Waiting);
        assert_eq!(clock.tick(&mut buffer, 50.0), ClockTick::Advanced { frames: 1 });
        assert_eq!(clock.current_time(), 200.0);
    }

    #[test]
    fn starts_from_first_frame_when_joining_late() {
        let mut buffer = buffer_with(&[30_000.0]);
        let mut clock = FrameStableClock::new(0.0);

        assert_eq!(clock.tick(&mut buffer, 16.0), ClockTick::Advanced { frames: 1 });
        assert_eq!(clock.current_time(), 30_000.0);
    }

    #[test]
    fn time_never_goes_backwards() {
        let mut buffer = buffer_with(&[500.0, 400.0, 600.0]);
        let mut clock = FrameStableClock::new(0.0);

        clock.tick(&mut buffer, 0.0);
        assert_eq!(clock.current_time(), 500.0);
        clock.tick(&mut buffer, 100.0);
        assert_eq!(clock.current_time(), 600.0);
    }
}
