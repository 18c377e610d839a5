/// One-shot sounds raised by race events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Impact,
}

/// Where the engine loop and one-shot sounds go.
///
/// Every call must be idempotent: asking a playing loop to play again changes nothing.
pub trait AudioSink {
    fn play_engine_loop(&mut self);
    fn pause_engine_loop(&mut self);
    fn play_impact(&mut self);
    fn is_engine_playing(&self) -> bool;

    fn play_cue(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Impact => self.play_impact(),
        }
    }
}

/// Silent sink, used when no audio device or asset is available
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_engine_loop(&mut self) {}
    fn pause_engine_loop(&mut self) {}
    fn play_impact(&mut self) {}

    fn is_engine_playing(&self) -> bool {
        false
    }
}

/// Sink that only remembers what it was asked to do
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordingAudio {
    pub engine_playing: bool,
    /// Times the engine loop went from paused to playing
    pub engine_starts: u32,
    pub impacts: u32,
}

impl AudioSink for RecordingAudio {
    fn play_engine_loop(&mut self) {
        if !self.engine_playing {
            self.engine_playing = true;
            self.engine_starts += 1;
        }
    }

    fn pause_engine_loop(&mut self) {
        self.engine_playing = false;
    }

    fn play_impact(&mut self) {
        self.impacts += 1;
    }

    fn is_engine_playing(&self) -> bool {
        self.engine_playing
    }
}
