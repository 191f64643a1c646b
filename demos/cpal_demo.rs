/// Real-time playback demo: the engine and effect chain live inside the
/// cpal audio callback, the main thread plays a short melody by pushing
/// messages through the lock-free queue. Run with `cargo run --example
/// cpal_demo`.
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

use modsynth::dsp::Waveform;
use modsynth::engine::{EngineMessage, EngineParam, VoiceEngine};
use modsynth::fx::delay::Delay;
use modsynth::fx::reverb::Reverb;
use modsynth::fx::{EffectChain, EffectUnit};
use modsynth::MAX_BLOCK_SIZE;

fn main() {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .expect("no output device available");
    let config = device
        .default_output_config()
        .expect("no default output config");

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    println!("Output: {} Hz, {} channel(s)", sample_rate, channels);

    let (tx, rx) = RingBuffer::<EngineMessage>::new(256);

    let err_fn = |err| eprintln!("stream error: {err}");
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            rx,
            err_fn,
        ),
        cpal::SampleFormat::I16 => build_stream::<i16>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            rx,
            err_fn,
        ),
        cpal::SampleFormat::U16 => build_stream::<u16>(
            &device,
            &config.into(),
            channels,
            sample_rate,
            rx,
            err_fn,
        ),
        other => panic!("unsupported sample format {other:?}"),
    }
    .expect("failed to build output stream");

    stream.play().expect("failed to start stream");

    play_melody(tx);

    // Let the final release and echo tail ring out
    thread::sleep(Duration::from_secs(2));
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    sample_rate: f32,
    mut rx: rtrb::Consumer<EngineMessage>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let mut engine = VoiceEngine::new(sample_rate);
    let mut chain = EffectChain::new();
    chain.add(
        "echo",
        EffectUnit::Delay(Delay::new(0.25, 0.35, sample_rate)),
    );
    chain.add(
        "room",
        EffectUnit::Reverb(Reverb::new(0.6, 0.4, sample_rate)),
    );

    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let frames = (data.len() / channels).min(MAX_BLOCK_SIZE);
            let block = &mut mono[..frames];

            engine.process_block(&mut rx, block);
            chain.process(block);

            for (frame, &sample) in data.chunks_mut(channels).zip(block.iter()) {
                for out in frame.iter_mut() {
                    *out = T::from_sample(sample);
                }
            }
        },
        err_fn,
        None,
    )
}

fn play_melody(mut tx: Producer<EngineMessage>) {
    // A minor pentatonic phrase
    let notes = [220.0, 261.63, 293.66, 329.63, 392.0, 329.63, 293.66, 220.0];

    let _ = tx.push(EngineMessage::SetWaveform(Waveform::Sawtooth));
    let _ = tx.push(EngineMessage::SetParam(EngineParam::FilterCutoff, 1_800.0));
    let _ = tx.push(EngineMessage::SetParam(EngineParam::EnvRelease, 0.15));
    let _ = tx.push(EngineMessage::SetParam(EngineParam::Volume, 0.6));

    for freq in notes {
        println!("note on  {freq:7.2} Hz");
        let _ = tx.push(EngineMessage::NoteOn {
            frequency: freq,
            velocity: 0.9,
        });
        thread::sleep(Duration::from_millis(250));

        let _ = tx.push(EngineMessage::NoteOff);
        thread::sleep(Duration::from_millis(80));
    }
}
