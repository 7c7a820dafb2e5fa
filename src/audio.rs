//! Sound effects, synthesized once at startup.

use fundsp::prelude64::*;
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::game::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Maps `u` in 0..=1 onto the -1..=1 domain `lerp11` expects.
fn unit11(u: f64) -> f64 {
    u.clamp(0.0, 1.0) * 2.0 - 1.0
}

fn render(sound: &mut dyn AudioUnit, secs: f64) -> Vec<f32> {
    sound.set_sample_rate(SAMPLE_RATE as f64);
    let len = (SAMPLE_RATE as f64 * secs) as usize;
    (0..len).map(|_| sound.get_mono() as f32).collect()
}

/// Quick rising chirp.
fn flap() -> Vec<f32> {
    let freq = lfo(|t: f64| lerp11(320.0, 720.0, unit11(t / 0.08)));
    let gain = lfo(|t: f64| lerp11(0.12, 0.0, unit11(t / 0.1)));
    let mut sound = (freq >> sine()) * gain;
    render(&mut sound, 0.1)
}

/// Two-note blip.
fn point() -> Vec<f32> {
    let freq = lfo(|t: f64| if t < 0.07 { 880.0 } else { 1320.0 });
    let gain = lfo(|t: f64| lerp11(0.12, 0.0, unit11(t / 0.2)));
    let mut sound = (freq >> sine()) * gain;
    render(&mut sound, 0.2)
}

/// Falling sawtooth, 400Hz down to 80Hz.
fn crash() -> Vec<f32> {
    let freq = lfo(|t: f64| lerp11(400.0, 80.0, unit11(t / 0.4)));
    let gain = lfo(|t: f64| lerp11(0.15, 0.0, unit11(t / 0.5)));
    let mut sound = (freq >> saw()) * gain;
    render(&mut sound, 0.5)
}

struct Sounds {
    flap: Vec<f32>,
    point: Vec<f32>,
    crash: Vec<f32>,
}

impl Sounds {
    fn synthesize() -> Self {
        Self {
            flap: flap(),
            point: point(),
            crash: crash(),
        }
    }

    fn for_event(&self, event: GameEvent) -> Option<&[f32]> {
        match event {
            GameEvent::Flapped => Some(&self.flap),
            GameEvent::Scored => Some(&self.point),
            GameEvent::Crashed => Some(&self.crash),
            GameEvent::Restarted => None,
        }
    }
}

/// Plays game events through the default output device, or nothing at all.
pub struct Audio {
    output: Option<(OutputStream, Sounds)>,
}

impl Audio {
    /// Opens the default output device. Never fails; without a device the
    /// game just runs silently.
    pub fn open(enabled: bool) -> Self {
        if !enabled {
            return Self::silent();
        }
        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // The drop notice would land on the restored shell.
                stream.log_on_drop(false);
                Self {
                    output: Some((stream, Sounds::synthesize())),
                }
            }
            Err(err) => {
                log::warn!("audio unavailable, running silently: {err}");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { output: None }
    }

    #[cfg(test)]
    fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&self, event: GameEvent) {
        let Some((stream, sounds)) = &self.output else {
            return;
        };
        if let Some(samples) = sounds.for_event(event) {
            let sink = Sink::connect_new(stream.mixer());
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
            sink.detach(); // Play in background
        }
    }
}
