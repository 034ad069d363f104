use crate::config_loader::SETTINGS;
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::sync::mpsc::{channel, Sender};
use std::thread;

/// Plays encoded WAV buffers on a dedicated audio thread.
///
/// The output stream must live on the thread that created it, so the engine
/// owns one long-lived thread and feeds it buffers over a channel. Buffers
/// are played fire-and-forget; the transcoding pipeline never waits on
/// playback.
#[derive(Clone)]
pub struct AudioEngine {
    tx: Sender<Vec<u8>>,
}

impl AudioEngine {
    pub fn new() -> Self {
        let (tx, rx) = channel::<Vec<u8>>();

        thread::spawn(move || {
            // Audio stream must live on this thread
            let (_stream, stream_handle) =
                OutputStream::try_default().expect("No audio output device found");

            while let Ok(wav) = rx.recv() {
                log::debug!("Audio thread: playing {}-byte WAV buffer", wav.len());

                let cursor = Cursor::new(wav);
                match Sink::try_new(&stream_handle) {
                    Ok(sink) => match Decoder::new(cursor) {
                        Ok(source) => {
                            let volume = SETTINGS
                                .read()
                                .map(|s| s.playback_volume)
                                .unwrap_or(1.0);
                            sink.set_volume(volume);
                            sink.append(source);
                            // The stream outlives the sink (it lives in this
                            // loop), so detaching is safe and keeps the next
                            // buffer from queueing behind this one.
                            sink.detach();
                        }
                        Err(e) => log::error!("Failed to decode WAV buffer: {}", e),
                    },
                    Err(e) => log::error!("Failed to create sink: {}", e),
                }
            }
        });

        Self { tx }
    }

    /// Queues a WAV buffer for playback. No-op when playback is disabled.
    pub fn play(&self, wav: Vec<u8>) {
        let enabled = SETTINGS
            .read()
            .map(|s| s.enable_playback)
            .unwrap_or(true);

        if !enabled {
            log::debug!("Playback disabled; dropping {}-byte WAV buffer", wav.len());
            return;
        }

        let _ = self.tx.send(wav);
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
