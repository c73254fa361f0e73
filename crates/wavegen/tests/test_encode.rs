//! End-to-end encoding tests against the public entry point.

use pretty_assertions::assert_eq;

use wavegen::expr::ExprErrorKind;
use wavegen::{encode, WaveSpec, WavegenError};

fn exprs(sources: &[&str]) -> Vec<WaveSpec> {
    sources.iter().map(|s| WaveSpec::from(*s)).collect()
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[test]
fn test_square_wave_at_8000_hz() {
    let mut out = Vec::new();
    let report = encode(&mut out, 8000, 8, 4, exprs(&["sq(t*1000)"]), true).unwrap();

    assert_eq!(out.len(), 48);
    assert_eq!(&out[0..4], b"RIFF");
    assert_eq!(le_u32(&out, 4), 40);
    assert_eq!(&out[8..16], b"WAVEfmt ");
    assert_eq!(le_u32(&out, 16), 16);
    assert_eq!(le_u16(&out, 20), 1);
    assert_eq!(le_u16(&out, 22), 1);
    assert_eq!(le_u32(&out, 24), 8000);
    assert_eq!(le_u32(&out, 28), 8000);
    assert_eq!(le_u16(&out, 32), 1);
    assert_eq!(le_u16(&out, 34), 8);
    assert_eq!(&out[36..40], b"data");
    assert_eq!(le_u32(&out, 40), 4);
    assert_eq!(out[44..].to_vec(), vec![255u8, 255, 255, 255]);

    assert_eq!(report.frames, 4);
    assert_eq!(report.header.data_size, 4);
    assert_eq!(report.header.block_align, 1);
}

#[test]
fn test_riff_size_formula() {
    for channels in 1..=3usize {
        for bits in [1i64, 8, 12, 16, 24, 32, 33, 64] {
            for count in [0i64, 1, 7, 100] {
                let sources = vec!["sin(t*100)"; channels];
                let mut out = Vec::new();
                encode(&mut out, 11025, bits, count, exprs(&sources), true).unwrap();

                let bytes_per_sample = (bits as usize + 7) / 8;
                let data_size = channels * bytes_per_sample * count as usize;
                assert_eq!(le_u32(&out, 4) as usize, 36 + data_size);
                assert_eq!(le_u32(&out, 40) as usize, data_size);
                assert_eq!(out.len(), 44 + data_size);
            }
        }
    }
}

#[test]
fn test_zero_samples_gives_bare_header() {
    let mut out = Vec::new();
    encode(&mut out, 44100, 16, 0, exprs(&["sin(t)", "cos(t)"]), true).unwrap();
    assert_eq!(out.len(), 44);
}

#[test]
fn test_12_bit_full_scale_is_left_aligned() {
    let mut out = Vec::new();
    encode(&mut out, 8000, 12, 1, exprs(&["1.0"]), true).unwrap();
    let expected = ((1i32 << 11) - 1) << 4;
    assert_eq!(out[44..].to_vec(), (expected as u16).to_le_bytes().to_vec());
}

#[test]
fn test_zero_sample_rate_is_rejected_before_output() {
    let mut out = Vec::new();
    let err = encode(&mut out, 0, 8, 4, exprs(&["t"]), true).unwrap_err();
    assert!(matches!(err, WavegenError::InvalidParameter { ref name, .. } if name == "sample_rate"));
    assert!(out.is_empty());
}

#[test]
fn test_negative_inputs_are_rejected() {
    let cases = [
        (-8000, 8, 4, "sample_rate"),
        (8000, -8, 4, "bits_per_sample"),
        (8000, 0, 4, "bits_per_sample"),
        (8000, 65536, 4, "bits_per_sample"),
        (8000, 8, -1, "sample_count"),
    ];
    for (rate, bits, count, field) in cases {
        let mut out = Vec::new();
        let err = encode(&mut out, rate, bits, count, exprs(&["t"]), true).unwrap_err();
        match err {
            WavegenError::InvalidParameter { name, .. } => assert_eq!(name, field),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
        assert!(out.is_empty());
    }
}

#[test]
fn test_no_channels_is_rejected() {
    let mut out = Vec::new();
    let err = encode(&mut out, 8000, 8, 4, Vec::new(), true).unwrap_err();
    assert_eq!(err.code(), "WAVEGEN_001");
    assert!(out.is_empty());
}

#[test]
fn test_incomplete_expression_is_rejected_before_output() {
    let mut out = Vec::new();
    let err = encode(&mut out, 8000, 8, 4, exprs(&["t +"]), true).unwrap_err();
    match err {
        WavegenError::InvalidExpression { channel, source } => {
            assert_eq!(channel, 0);
            assert_eq!(source.kind, ExprErrorKind::UnexpectedEnd);
            assert_eq!(source.offset, 3);
        }
        other => panic!("expected InvalidExpression, got {other:?}"),
    }
    assert!(out.is_empty());
}

#[test]
fn test_unknown_name_is_rejected() {
    let mut out = Vec::new();
    let err = encode(&mut out, 8000, 8, 4, exprs(&["sin(t) * foo"]), true).unwrap_err();
    assert_eq!(err.code(), "WAVEGEN_002");
    assert!(err.to_string().contains("foo"));
}

#[test]
fn test_expression_and_function_channels_mix() {
    let mut out = Vec::new();
    let channels = vec![WaveSpec::from("1"), WaveSpec::function(|t| if t > 0.0 { -1.0 } else { 0.0 })];
    encode(&mut out, 8000, 8, 2, channels, false).unwrap();
    assert_eq!(out, vec![255, 128, 255, 1]);
}

#[test]
fn test_piecewise_expression() {
    let mut out = Vec::new();
    encode(&mut out, 4, 8, 4, exprs(&["1 if t < 0.5 else -1"]), false).unwrap();
    assert_eq!(out, vec![255, 255, 1, 1]);
}

#[test]
fn test_identical_runs_hash_identically() {
    let run = || {
        let mut out = Vec::new();
        let report = encode(
            &mut out,
            44100,
            24,
            441,
            exprs(&["sin(2*pi*440*t) * fadein(t, 0.005)", "saw(2*pi*110*t)"]),
            true,
        )
        .unwrap();
        (out, report.pcm_hash)
    };
    let (a, hash_a) = run();
    let (b, hash_b) = run();
    assert_eq!(a, b);
    assert_eq!(hash_a, hash_b);
}
