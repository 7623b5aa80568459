use clock_core::rng::Xor128;

const SAMPLE_SEEDS: [u64; 8] = [
    0,
    1,
    2,
    42,
    0xDEAD_BEEF,
    u32::MAX as u64,
    1_717_243_200_000,
    u64::MAX,
];

#[test]
fn same_seed_same_words() {
    for seed in SAMPLE_SEEDS {
        let mut a = Xor128::new(seed);
        let mut b = Xor128::new(seed);
        for draw in 0..10_000 {
            assert_eq!(a.next_word(), b.next_word(), "seed={seed} draw={draw}");
        }
    }
}

#[test]
fn state_never_collapses_to_zero() {
    for seed in SAMPLE_SEEDS {
        let mut rng = Xor128::new(seed);
        assert_ne!(rng.state(), [0; 4], "seed={seed}");
        let mut nonzero_words = 0u32;
        for _ in 0..10_000 {
            if rng.next_word() != 0 {
                nonzero_words += 1;
            }
            assert_ne!(rng.state(), [0; 4], "seed={seed}");
        }
        assert!(nonzero_words > 9_990, "seed={seed} nonzero={nonzero_words}");
    }
}

#[test]
fn neighbouring_seeds_diverge() {
    let mut a = Xor128::new(1);
    let mut b = Xor128::new(2);
    let matches = (0..1_000).filter(|_| a.next_word() == b.next_word()).count();
    assert!(matches < 3, "matches={matches}");
}

#[test]
fn shuffle_preserves_multiset() {
    let mut rng = Xor128::new(0x5EED);
    for len in [0usize, 1, 2, 10, 1000] {
        // Duplicates on purpose, so the multiset check is not just a set check.
        let input: Vec<usize> = (0..len).map(|i| i / 3).collect();
        let shuffled = rng.shuffle(&input);
        assert_eq!(shuffled.len(), len);

        let mut sorted = shuffled;
        sorted.sort_unstable();
        assert_eq!(sorted, input, "len={len}");
    }
}

#[test]
fn shuffle_positions_are_uniform() {
    const LEN: usize = 10;
    const SHUFFLES: u32 = 100_000;

    let mut rng = Xor128::new(0x5EED);
    let mut counts = [[0u32; LEN]; LEN];
    let mut items = [0usize; LEN];
    for _ in 0..SHUFFLES {
        for (i, item) in items.iter_mut().enumerate() {
            *item = i;
        }
        rng.shuffle_in_place(&mut items);
        for (position, &element) in items.iter().enumerate() {
            counts[element][position] += 1;
        }
    }

    let expected = SHUFFLES as f64 / LEN as f64;
    let mut chi_square = 0.0;
    for (element, row) in counts.iter().enumerate() {
        for (position, &observed) in row.iter().enumerate() {
            let deviation = (observed as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "element {element} at position {position}: observed={observed}"
            );
            chi_square += (observed as f64 - expected).powi(2) / expected;
        }
    }

    // 81 degrees of freedom; 160 is far beyond the 99.99th percentile.
    assert!(chi_square < 160.0, "chi_square={chi_square}");
}

#[test]
fn shuffle_text_scrambles_but_keeps_characters() {
    let mut rng = Xor128::new(9);
    let stamp = "2024-06-01 12:34:56.789";
    let scrambled = rng.shuffle_text(stamp);

    let mut expected: Vec<char> = stamp.chars().collect();
    let mut actual: Vec<char> = scrambled.chars().collect();
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}
