use crate::io::PrintTarget;
use crate::params::MsgLevel;
use std::fmt::Arguments;
use std::io::Write;
use std::time::{Duration, Instant};

/// Progress output and time keeping for one engine run.
///
/// Messages are written to the problem's print target, filtered by the
/// message level.  Periodic progress lines are further limited by the
/// output frequency and delay.
pub(crate) struct Progress<'a> {
    out: &'a mut PrintTarget,
    msg_lev: MsgLevel,
    out_frq: usize,
    out_dly: Duration,
    tm_lim: Option<Duration>,
    start: Instant,
}

impl<'a> Progress<'a> {
    /// Times are in milliseconds; `i32::MAX` disables the time limit.
    pub fn new(out: &'a mut PrintTarget, msg_lev: MsgLevel, out_frq: i32, out_dly: i32, tm_lim: i32) -> Self {
        let ms = |v: i32| Duration::from_millis(v.max(0) as u64);
        Self {
            out,
            msg_lev,
            out_frq: out_frq.max(1) as usize,
            out_dly: ms(out_dly),
            tm_lim: (tm_lim != i32::MAX).then(|| ms(tm_lim)),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn time_exceeded(&self) -> bool {
        self.tm_lim.map_or(false, |lim| self.elapsed() >= lim)
    }

    /// Periodic progress line, shown every `out_frq` iterations once the
    /// output delay has passed.  `force` skips the frequency check.
    pub fn status(&mut self, iter: usize, force: bool, args: Arguments) {
        if self.msg_lev < MsgLevel::Normal || self.elapsed() < self.out_dly {
            return;
        }
        if force || iter % self.out_frq == 0 {
            self.write(args);
        }
    }

    /// informational message, shown at the highest message level
    pub fn info(&mut self, args: Arguments) {
        if self.msg_lev >= MsgLevel::All {
            self.write(args);
        }
    }

    /// error message, shown unless output is off
    pub fn error(&mut self, args: Arguments) {
        if self.msg_lev >= MsgLevel::Error {
            self.write(args);
        }
    }

    // progress output is best effort, a failing stream does not
    // interrupt the solver
    fn write(&mut self, args: Arguments) {
        let _ = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n"));
    }

    /// Progress for a nested run: same target, clock and time limit,
    /// with its own message level.
    pub fn child(&mut self, msg_lev: MsgLevel) -> Progress<'_> {
        Progress {
            out: &mut *self.out,
            msg_lev: msg_lev.min(self.msg_lev),
            out_frq: self.out_frq,
            out_dly: self.out_dly,
            tm_lim: self.tm_lim,
            start: self.start,
        }
    }
}

#[test]
fn test_progress_filtering() {
    use crate::io::ConfigurablePrintTarget;
    let mut out = PrintTarget::default();
    out.print_to_buffer();

    let mut p = Progress::new(&mut out, MsgLevel::Normal, 2, 0, i32::MAX);
    p.status(1, false, format_args!("one"));
    p.status(2, false, format_args!("two"));
    p.status(3, true, format_args!("three"));
    p.info(format_args!("hidden"));
    p.error(format_args!("shown"));
    assert!(!p.time_exceeded());

    assert_eq!(out.get_print_buffer().unwrap(), "two\nthree\nshown\n");

    let mut p = Progress::new(&mut out, MsgLevel::All, 1, 0, 0);
    assert!(p.time_exceeded());
    p.info(format_args!("x"));
}
