//! Basic example of aligning two GPS tracks.
//!
//! Run with: cargo run --example basic_alignment

use track_aligner::{compare_tracks, AlignConfig, AlignedPair, GpsPoint};

fn main() {
    // A short walk along the Thames (London), sampled every few meters
    let walk = vec![
        GpsPoint::new(51.5074, -0.1278), // Start
        GpsPoint::new(51.5077, -0.1283),
        GpsPoint::new(51.5080, -0.1290),
        GpsPoint::new(51.5085, -0.1295),
        GpsPoint::new(51.5090, -0.1300),
        GpsPoint::new(51.5095, -0.1305),
        GpsPoint::new(51.5100, -0.1310),
        GpsPoint::new(51.5110, -0.1320), // End
    ];

    // The same walk logged by a second device, coarser and in the other direction,
    // with a detour in the middle
    let device2 = vec![
        GpsPoint::new(51.5110, -0.1320),
        GpsPoint::new(51.5100, -0.1311),
        GpsPoint::new(51.5094, -0.1330), // Detour
        GpsPoint::new(51.5080, -0.1289),
        GpsPoint::new(51.5074, -0.1278),
    ];

    println!("Track Alignment Example\n");

    for spacing in [None, Some(20.0)] {
        let config = AlignConfig {
            redistribute_spacing: spacing,
            ..AlignConfig::from_cutoff(15.0)
        };

        match spacing {
            Some(m) => println!("Redistributed every {}m, cutoff 15m:", m),
            None => println!("Raw points, cutoff 15m:"),
        }

        let result = match compare_tracks(&walk, &device2, &config) {
            Ok(result) => result,
            Err(e) => {
                println!("   Comparison failed: {}\n", e);
                continue;
            }
        };

        println!("   Reversed: {}", result.reversed);
        println!(
            "   Points: {} vs {}",
            result.track1.len(),
            result.track2.len()
        );

        let mut matched = 0;
        let mut only_first = 0;
        let mut only_second = 0;
        for pair in result.alignment.pairs() {
            match pair {
                AlignedPair::Matched(..) => matched += 1,
                AlignedPair::OnlyFirst(_) => only_first += 1,
                AlignedPair::OnlySecond(_) => only_second += 1,
            }
        }
        println!(
            "   Columns: {} matched, {} only in walk, {} only in device 2",
            matched, only_first, only_second
        );
        println!("   Similarity: {:.1}%\n", result.similarity * 100.0);
    }
}
