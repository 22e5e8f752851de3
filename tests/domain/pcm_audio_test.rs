use eloquence::domain::{PcmAudio, PcmStreamDescriptor, SampleCodec};

use crate::helpers::{build_wav, canonical_wav};

#[test]
fn given_canonical_wav_when_wrapping_then_accepts() {
    let wav = canonical_wav(1_600);

    let pcm = PcmAudio::from_wav(wav.clone()).unwrap();

    assert_eq!(pcm.byte_len(), wav.len());
    assert_eq!(pcm.descriptor(), PcmStreamDescriptor::CANONICAL);
}

#[test]
fn given_stereo_or_wrong_rate_when_wrapping_then_rejects() {
    let stereo = build_wav(16_000, 2, &[0i16; 320]);
    let cd_rate = build_wav(44_100, 1, &[0i16; 441]);

    assert!(PcmAudio::from_wav(stereo).is_err());
    assert!(PcmAudio::from_wav(cd_rate).is_err());
}

#[test]
fn given_non_wav_bytes_when_wrapping_then_rejects() {
    assert!(PcmAudio::from_wav(b"ID3\x04\x00 not a wav".to_vec()).is_err());
}

#[test]
fn given_pcm_when_chunking_then_slices_cover_all_bytes_in_order() {
    let wav = canonical_wav(1_000);
    let pcm = PcmAudio::from_wav(wav.clone()).unwrap();

    let chunks: Vec<_> = pcm.chunks(300).collect();

    assert!(chunks.iter().all(|c| c.len() <= 300));
    assert_eq!(chunks.len(), wav.len().div_ceil(300));
    assert_eq!(chunks.concat(), wav);
}

#[test]
fn given_foreign_wav_when_inspecting_then_reports_actual_profile() {
    let wav = build_wav(44_100, 2, &[0i16; 882]);

    let descriptor = PcmStreamDescriptor::inspect_wav(&wav).unwrap();

    assert_eq!(descriptor.codec, SampleCodec::PcmS16Le);
    assert_eq!(descriptor.channels, 2);
    assert_eq!(descriptor.sample_rate, 44_100);
    assert_ne!(descriptor, PcmStreamDescriptor::CANONICAL);
}
