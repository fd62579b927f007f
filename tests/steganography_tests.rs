use lsb_lock::{
    Container, PixelGrid, StegoError,
    bits::encode_int,
    container::required_bits,
    steganography::{capacity, embed, embed_container, extract, unlock},
};
use rand::{Rng, RngCore};

/// 一个辅助函数，用于创建一个带有随机样本的网格
fn random_grid(rows: usize, cols: usize, channels: usize) -> PixelGrid {
    let mut samples = vec![0u8; rows * cols * channels];
    rand::rng().fill_bytes(&mut samples);
    PixelGrid::new(rows, cols, channels, samples).expect("Buffer size must match.")
}

/// 直接把比特流写进样本最低有效位，用于构造任意头部
fn grid_with_bits(rows: usize, cols: usize, channels: usize, bits: &[u8]) -> PixelGrid {
    let mut grid = PixelGrid::filled(rows, cols, channels, 0x80);
    grid.samples_mut()
        .iter_mut()
        .zip(bits)
        .for_each(|(sample, &bit)| *sample |= bit);
    grid
}

#[test]
fn small_grid_reports_capacity_error() {
    // 4x4x3 = 48 个样本，"x" + "hi" 需要 72 位
    let mut grid = random_grid(4, 4, 3);
    let original = grid.clone();

    let err = embed(&mut grid, "x", "hi").unwrap_err();
    assert!(matches!(
        err,
        StegoError::Capacity {
            required: 72,
            available: 48
        }
    ));
    assert_eq!(grid, original, "The grid must not be modified.");
}

#[test]
fn empty_inputs_are_rejected_before_capacity() {
    let mut grid = random_grid(4, 4, 3);
    assert!(matches!(
        embed(&mut grid, "", "hi"),
        Err(StegoError::EmptyPasscode)
    ));
    assert!(matches!(
        embed(&mut grid, "x", ""),
        Err(StegoError::EmptyMessage)
    ));
}

#[test]
fn ten_by_ten_grid_round_trips() {
    let mut grid = random_grid(10, 10, 3);
    let written = embed(&mut grid, "x", "hi").unwrap();
    assert_eq!(written, 72);

    let container = extract(&grid).unwrap();
    assert_eq!(container, Container::new("x", "hi").unwrap());
}

#[test]
fn random_payloads_round_trip_or_report_capacity() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let passcode: String = (0..rng.random_range(1..20))
            .map(|_| char::from(rng.random::<u8>()))
            .collect();
        let message: String = (0..rng.random_range(1..200))
            .map(|_| char::from(rng.random::<u8>()))
            .collect();
        let required = required_bits(passcode.chars().count(), message.chars().count());

        // 网格按所需位数定尺寸，一半刚好放得下，一半少一行
        let cols = 16;
        let channels = rng.random_range(1..=4);
        let fitting_rows = required.div_ceil(cols * channels);
        let fits = rng.random_bool(0.5);
        let rows = if fits { fitting_rows } else { fitting_rows - 1 };
        let mut grid = random_grid(rows, cols, channels);
        let original = grid.clone();

        if fits {
            assert_eq!(embed(&mut grid, &passcode, &message).unwrap(), required);
            let container = extract(&grid).unwrap();
            assert_eq!(container.passcode, passcode);
            assert_eq!(container.message, message);
        } else {
            let available = rows * cols * channels;
            match embed(&mut grid, &passcode, &message) {
                Err(StegoError::Capacity {
                    required: reported,
                    available: reported_available,
                }) => {
                    assert_eq!(reported, required);
                    assert_eq!(reported_available, available);
                }
                other => panic!("expected a capacity error, got {other:?}"),
            }
            assert_eq!(grid, original, "The grid must not be modified.");
        }
    }
}

#[test]
fn high_sample_bits_are_ignored_on_extraction() {
    let mut grid = random_grid(12, 12, 3);
    embed(&mut grid, "pw", "lsb only").unwrap();

    // 只改动高位，最低位保持不变
    grid.samples_mut()
        .iter_mut()
        .for_each(|sample| *sample = (*sample & 1) | 0xF0);
    assert_eq!(unlock(&grid, "pw").unwrap(), "lsb only");
}

#[test]
fn samples_past_the_payload_are_untouched() {
    let mut grid = random_grid(20, 20, 3);
    let original = grid.clone();

    let written = embed(&mut grid, "key", "payload").unwrap();
    assert_eq!(written, required_bits(3, 7));

    assert_eq!(&grid.samples()[written..], &original.samples()[written..]);
    grid.samples()
        .iter()
        .zip(original.samples())
        .take(written)
        .for_each(|(&after, &before)| assert_eq!(after & 0xFE, before & 0xFE));
}

#[test]
fn exact_fit_succeeds_and_one_bit_over_fails() {
    // "ab" + "c" 需要 48 + 24 = 72 位
    let mut exact = random_grid(4, 6, 3);
    assert_eq!(exact.sample_count(), 72);
    assert_eq!(embed(&mut exact, "ab", "c").unwrap(), 72);
    assert_eq!(unlock(&exact, "ab").unwrap(), "c");

    let mut short = random_grid(71, 1, 1);
    let original = short.clone();
    assert!(matches!(
        embed(&mut short, "ab", "c"),
        Err(StegoError::Capacity {
            required: 72,
            available: 71
        })
    ));
    assert_eq!(short, original);
}

#[test]
fn wrong_passcode_does_not_disclose_message() {
    let mut grid = random_grid(16, 16, 3);
    embed(&mut grid, "abc", "the message").unwrap();

    let err = unlock(&grid, "abd").unwrap_err();
    assert!(matches!(err, StegoError::PasscodeMismatch));
    assert!(!err.to_string().contains("the message"));

    assert_eq!(unlock(&grid, "abc").unwrap(), "the message");
    assert!(matches!(unlock(&grid, ""), Err(StegoError::EmptyPasscode)));
}

#[test]
fn oversized_header_reports_truncation() {
    // 口令长度声明为 65535 字节，远超 10x10x3 网格
    let grid = grid_with_bits(10, 10, 3, &encode_int(u16::MAX as u64, 16));
    let err = extract(&grid).unwrap_err();
    assert!(matches!(
        err,
        StegoError::Truncated {
            field: "passcode",
            available: 284,
            ..
        }
    ));
}

#[test]
fn oversized_message_length_reports_truncation() {
    let mut bits = encode_int(1, 16);
    bits.extend(encode_int(u64::from(b'k'), 8));
    bits.extend(encode_int(u32::MAX as u64, 32));
    let grid = grid_with_bits(10, 10, 3, &bits);

    assert!(matches!(
        extract(&grid),
        Err(StegoError::Truncated {
            field: "message",
            ..
        })
    ));
}

#[test]
fn grid_smaller_than_header_reports_truncation() {
    let grid = PixelGrid::filled(2, 2, 3, 0);
    assert!(matches!(
        extract(&grid),
        Err(StegoError::Truncated {
            field: "passcode length",
            required: 16,
            available: 12
        })
    ));
}

#[test]
fn wide_characters_are_rejected_without_mutation() {
    let mut grid = random_grid(30, 30, 3);
    let original = grid.clone();

    assert!(matches!(
        embed(&mut grid, "pass", "日本"),
        Err(StegoError::Encoding {
            field: "message",
            index: 0,
            ..
        })
    ));
    assert_eq!(grid, original);
}

#[test]
fn embedding_replaces_a_previous_container() {
    let mut grid = random_grid(30, 30, 3);
    embed(&mut grid, "first", "a much longer first message").unwrap();

    let second = Container::new("second", "short").unwrap();
    embed_container(&mut grid, &second).unwrap();
    assert_eq!(extract(&grid).unwrap(), second);
}

#[test]
fn capacity_accounts_for_the_header() {
    let grid = PixelGrid::filled(10, 10, 3, 0);
    let report = capacity(&grid);
    assert_eq!(report.total_bits, 300);
    assert_eq!(report.header_bits, 48);
    assert_eq!(report.max_payload_bytes, 31);

    let tiny = PixelGrid::filled(1, 1, 3, 0);
    assert_eq!(capacity(&tiny).max_payload_bytes, 0);
}
