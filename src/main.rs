// Regenerates Firmware/Core/Inc/audio_samples.h from the voice prompt recordings

fn main() {
    // Failures are logged by the batch before they reach here
    if voicepack_lib::run().is_err() {
        std::process::exit(1);
    }
}
