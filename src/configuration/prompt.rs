//! Interactive parameter entry on the console.
//!
//! Each parameter is asked once with its current value shown as the default.
//! An empty answer keeps the default, a bad answer is reported and the same
//! parameter is asked again. End of input keeps every remaining default.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use super::config::{
    check_capture_radius, check_non_negative, check_positive, check_probability, ConfigError, SimulationConfig,
};

struct Console<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    closed: bool, // input hit EOF
}

impl<R: BufRead, W: Write> Console<'_, R, W> {
    fn ask<T, F>(&mut self, name: &'static str, default: T, check: F) -> io::Result<T>
    where
        T: FromStr + Display + Copy,
        F: Fn(T) -> Result<(), ConfigError>,
    {
        loop {
            if self.closed {
                return Ok(default);
            }

            write!(self.output, "{name} [{default}]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                self.closed = true;
                writeln!(self.output)?;
                return Ok(default);
            }

            let answer = line.trim();
            let value = if answer.is_empty() {
                default
            } else {
                match answer.parse::<T>() {
                    Ok(v) => v,
                    Err(_) => {
                        let err = ConfigError::Parse { name, input: answer.to_string() };
                        writeln!(self.output, "  {err}")?;
                        continue;
                    }
                }
            };

            match check(value) {
                Ok(()) => return Ok(value),
                Err(err) => writeln!(self.output, "  {err}")?,
            }
        }
    }
}

/// Ask for every run parameter, starting from `defaults`
pub fn prompt_config<R: BufRead, W: Write>(defaults: SimulationConfig, input: &mut R, output: &mut W) -> io::Result<SimulationConfig> {
    let mut cfg = defaults;
    let mut console = Console { input, output, closed: false };

    cfg.screen.width = console.ask("screen width", cfg.screen.width, |v| check_positive("screen.width", v))?;
    cfg.screen.height = console.ask("screen height", cfg.screen.height, |v| check_positive("screen.height", v))?;
    cfg.particles.population = console.ask("target population", cfg.particles.population, |_| Ok(()))?;
    cfg.particles.trail_length = console.ask("trail length", cfg.particles.trail_length, |_| Ok(()))?;
    cfg.orbits.orbit_speed =
        console.ask("orbit speed", cfg.orbits.orbit_speed, |v| check_non_negative("orbits.orbit_speed", v))?;
    cfg.particles.roam_speed =
        console.ask("roam speed", cfg.particles.roam_speed, |v| check_non_negative("particles.roam_speed", v))?;

    // ordering against the absorption radius is enforced on the next question
    cfg.orbits.capture_radius =
        console.ask("capture radius", cfg.orbits.capture_radius, |v| check_positive("orbits.capture_radius", v))?;

    let capture = cfg.orbits.capture_radius;
    cfg.orbits.absorption_radius = console.ask("absorption radius", cfg.orbits.absorption_radius, |v| {
        check_positive("orbits.absorption_radius", v)?;
        check_capture_radius(capture, v)
    })?;

    cfg.probabilities.escape =
        console.ask("escape probability", cfg.probabilities.escape, |v| check_probability("probabilities.escape", v))?;
    cfg.probabilities.capture =
        console.ask("capture probability", cfg.probabilities.capture, |v| check_probability("probabilities.capture", v))?;
    cfg.orbits.count = console.ask("number of orbits", cfg.orbits.count, |_| Ok(()))?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (SimulationConfig, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let cfg = prompt_config(SimulationConfig::default(), &mut input, &mut output).unwrap();
        (cfg, String::from_utf8(output).unwrap())
    }

    #[test]
    fn empty_answers_keep_defaults() {
        let (cfg, _) = run("\n\n\n\n\n\n\n\n\n\n\n");
        assert_eq!(cfg, SimulationConfig::default());
    }

    #[test]
    fn eof_keeps_remaining_defaults() {
        let (cfg, _) = run("1024\n");
        assert_eq!(cfg.screen.width, 1024.0);
        assert_eq!(cfg.screen.height, 600.0);
        assert_eq!(cfg.orbits.count, 5);
    }

    #[test]
    fn non_numeric_answer_is_asked_again() {
        let (cfg, out) = run("wide\n640\n");
        assert_eq!(cfg.screen.width, 640.0);
        assert!(out.contains("could not parse \"wide\""));
        assert_eq!(out.matches("screen width [").count(), 2);
    }

    #[test]
    fn probability_out_of_range_is_asked_again() {
        // width, height, population, trail, orbit speed, roam speed, capture, absorption
        let (cfg, out) = run("\n\n\n\n\n\n\n\n1.5\n0.25\n");
        assert_eq!(cfg.probabilities.escape, 0.25);
        assert!(out.contains("must be a probability"));
    }

    #[test]
    fn absorption_must_stay_below_capture() {
        let (cfg, out) = run("\n\n\n\n\n\n20\n30\n10\n");
        assert_eq!(cfg.orbits.capture_radius, 20.0);
        assert_eq!(cfg.orbits.absorption_radius, 10.0);
        assert!(out.contains("must be greater than absorption radius"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn negative_population_is_a_parse_error() {
        let (cfg, out) = run("\n\n-5\n100\n");
        assert_eq!(cfg.particles.population, 100);
        assert!(out.contains("could not parse \"-5\""));
    }
}
