use log::debug;

/// Vibration pattern played when the rest timer elapses, in milliseconds
/// of alternating on/off.
pub const VIBRATION_PATTERN: [u32; 5] = [200, 100, 200, 100, 200];

pub const TONE_FREQUENCY_HZ: f32 = 880.0;
pub const TONE_DURATION_MS: u32 = 500;

/// Output channel for the timer-completion alert. Implementations wrap
/// whatever the platform offers; absence of a channel is an error the
/// [`Alerter`] downgrades, not a panic.
pub trait AlertDevice {
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), AlertError>;
    fn beep(&mut self, frequency_hz: f32, volume: u8, duration_ms: u32) -> Result<(), AlertError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("device unavailable")]
    Unavailable,
    #[error("playback blocked: {0}")]
    Blocked(String),
}

/// Plays the completion alert: vibration plus an audible tone.
///
/// Playback failures (missing permissions, unsupported device) are
/// recorded at debug level and otherwise swallowed; the countdown state
/// machine and the user never see them.
pub struct Alerter<D> {
    device: D,
    volume: u8,
}

impl<D: AlertDevice> Alerter<D> {
    pub fn new(device: D, volume: u8) -> Self {
        Self { device, volume }
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
    }

    pub fn play(&mut self) {
        if let Err(err) = self.device.vibrate(&VIBRATION_PATTERN) {
            debug!("vibration unavailable: {err}");
        }

        if let Err(err) = self
            .device
            .beep(TONE_FREQUENCY_HZ, self.volume, TONE_DURATION_MS)
        {
            debug!("alert tone failed: {err}");
        }
    }
}

/// Device for environments without audio or vibration (tests, headless).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAlertDevice;

impl AlertDevice for NullAlertDevice {
    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), AlertError> {
        Ok(())
    }

    fn beep(
        &mut self,
        _frequency_hz: f32,
        _volume: u8,
        _duration_ms: u32,
    ) -> Result<(), AlertError> {
        Ok(())
    }
}
