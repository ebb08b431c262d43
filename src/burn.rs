use std::ffi::OsStr;
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub const DEFAULT_JOB_ID: &str = "UNKNOWN";
pub const DEFAULT_DURATION: i64 = 10;

/// Keep one core busy until `duration` seconds have passed, writing a
/// heartbeat to `out` every time the whole-second count moves.
///
/// Returns the elapsed whole seconds at the moment the loop stopped.
pub fn run<W: Write>(job_id: &OsStr, duration: i64, out: &mut W) -> io::Result<u64> {
    let start = Instant::now();
    burn(job_id, duration, out, || start.elapsed())
}

/// Same as [`run`] but with the clock supplied by the caller.
pub fn burn<W, F>(job_id: &OsStr, duration: i64, out: &mut W, mut elapsed: F) -> io::Result<u64>
where
    W: Write,
    F: FnMut() -> Duration,
{
    // Negative durations never enter the loop.
    let target = u64::try_from(duration).unwrap_or(0);

    let mut seconds = 0;
    let mut prev = 0;

    // No sleep or yield in here, the spin is the whole point.
    while seconds < target {
        seconds = elapsed().as_secs();

        if seconds != prev {
            prev = seconds;
            out.write_all(b"Job id \"")?;
            out.write_all(job_id.as_encoded_bytes())?;
            writeln!(out, "\" elapsed Time: {} (s)", seconds)?;
        }
    }

    Ok(seconds)
}

pub fn finished<W: Write>(job_id: &OsStr, elapsed: u64, out: &mut W) -> io::Result<()> {
    out.write_all(b"Finished process \"")?;
    out.write_all(job_id.as_encoded_bytes())?;
    writeln!(out, "\" in {} (s)", elapsed)
}
