use super::*;
use crate::{assets::encode::encode_png, foundation::core::Rgba8, foundation::error::FotobooError};

#[test]
fn all_slots_settle_in_input_order() {
    let inputs: Vec<EncodedImage> = (1..=4u32)
        .map(|w| encode_png(&SourceImage::solid(w, 1, Rgba8::WHITE)).unwrap())
        .collect();

    let join = join_decodes(&inputs, Duration::from_secs(10));
    assert!(join.is_complete());
    for (i, outcome) in join.outcomes().iter().enumerate() {
        let SlotOutcome::Decoded(img) = outcome else {
            panic!("slot {i} did not decode");
        };
        assert_eq!(img.width(), i as u32 + 1);
    }
}

#[test]
fn failed_slot_is_reported_not_hung() {
    let good = encode_png(&SourceImage::solid(2, 2, Rgba8::BLACK)).unwrap();
    let bad = EncodedImage::new(image::ImageFormat::Png, b"broken".to_vec());

    let join = join_decodes(&[good, bad], Duration::from_secs(10));
    assert!(!join.is_complete());
    let failures = join.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    assert!(matches!(join.outcomes()[1], SlotOutcome::Failed(_)));
}

#[test]
fn slow_job_times_out_within_bound() {
    let join = join_with(vec![0u64, 400], Duration::from_millis(50), |delay_ms| {
        std::thread::sleep(Duration::from_millis(delay_ms));
        Ok(SourceImage::solid(1, 1, Rgba8::WHITE))
    });

    assert!(join.elapsed() < Duration::from_millis(350));
    assert!(join.outcomes()[0].is_decoded());
    assert_eq!(join.outcomes()[1], SlotOutcome::TimedOut);
    assert_eq!(join.failures()[0].0, 1);
}

#[test]
fn job_errors_carry_their_message() {
    let join = join_with(vec![()], Duration::from_secs(5), |_| {
        Err(FotobooError::decode("truncated scanline"))
    });
    assert_eq!(
        join.outcomes()[0].failure_reason().unwrap(),
        "decode error: truncated scanline"
    );
}

#[test]
fn empty_batch_is_trivially_complete() {
    let join = join_decodes(&[], Duration::from_millis(1));
    assert!(join.is_complete());
    assert!(join.outcomes().is_empty());
}
