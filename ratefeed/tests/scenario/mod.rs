use itertools::Itertools;
use rand::Rng;
use ratefeed::prelude::*;

use crate::{converter, decode, drain, encode};

#[rstest::rstest]
#[case(None)]
#[case(Some(7))]
#[case(Some(4000))]
fn passthrough_is_byte_identical(#[case] chunk: Option<usize>) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let input = (0..4000).map(|_| rng.random::<u8>()).collect::<Vec<_>>();

    let mut c = converter(48000, 48000, ScalingPolicy::Optimal, 8192)?;
    let plan = c.plan().unwrap();
    assert_eq!(ConversionStrategy::PlainCopy, plan.strategy());
    assert_eq!((1, 1), (plan.ratio().gx(), plan.ratio().gy()));

    let mut source = SliceSource::new(&input);
    if let Some(chunk) = chunk {
        source = source.with_chunk(chunk);
    }
    let mut output = vec![0; 4000];
    assert_eq!(4000, c.feed(&mut output, &mut source)?);
    assert_eq!(input, output);
    Ok(())
}

#[test]
fn cd_to_dat_exact() -> anyhow::Result<()> {
    let c = converter(44100, 48000, ScalingPolicy::Exact64, 8192)?;
    let plan = c.plan().unwrap();
    assert_eq!(ConversionStrategy::Exact64, plan.strategy());
    assert_eq!((147, 160), (plan.ratio().gx(), plan.ratio().gy()));
    Ok(())
}

#[test]
fn narrowband_to_22k_half() -> anyhow::Result<()> {
    let c = converter(8000, 11025, ScalingPolicy::Optimal, 8192)?;
    assert!(matches!(
        c.plan().unwrap().strategy(),
        ConversionStrategy::Scaled32 | ConversionStrategy::Scaled64 | ConversionStrategy::Exact64
    ));
    Ok(())
}

#[test]
fn rate_below_minimum() -> anyhow::Result<()> {
    let mut c = RateConverter::new(FeederConfig::default())?;
    assert_eq!(
        Err(ConfigError::InvalidRate(1000 * Hz, 4000 * Hz, 1_102_500 * Hz)),
        c.configure(RateSpec::new(1000 * Hz, 48000 * Hz), ScalingPolicy::Optimal)
    );
    assert_eq!(None, c.plan());
    Ok(())
}

#[rstest::rstest]
#[case(ScalingPolicy::Exact64)]
#[case(ScalingPolicy::Scaled64)]
#[case(ScalingPolicy::Scaled32)]
#[case(ScalingPolicy::PlainCopyForced)]
#[case(ScalingPolicy::Fixed)]
#[case(ScalingPolicy::Optimal)]
#[case(ScalingPolicy::Worst)]
fn dc_is_preserved(
    #[case] policy: ScalingPolicy,
    #[values(i16::MIN, -12345, 0, 1, 12345, i16::MAX)] value: i16,
) -> anyhow::Result<()> {
    let input = encode(&vec![value; 2 * 44100]);
    let mut c = converter(44100, 48000, policy, 8192)?;
    let output = decode(&drain(&mut c, &mut SliceSource::new(&input), 4096)?);

    let frames = output.len() / 2;
    assert!((47990..=48010).contains(&frames), "{frames}");
    assert!(output.iter().all(|&s| s == value));
    Ok(())
}

fn channel(samples: &[i16], ch: usize) -> Vec<i64> {
    samples.iter().skip(ch).step_by(2).map(|&s| i64::from(s)).collect()
}

#[rstest::rstest]
#[case(44100, 48000)]
#[case(48000, 44100)]
#[case(32000, 48000)]
#[case(48000, 8000)]
fn scaled32_tracks_exact64_on_ramp(#[case] src: u32, #[case] dst: u32) -> anyhow::Result<()> {
    const WRAP: u32 = 32767;
    let input = encode(
        &(0..70000u32)
            .map(|n| (n % WRAP) as i16)
            .flat_map(|n| [n, -n])
            .collect::<Vec<_>>(),
    );

    let mut exact = converter(src, dst, ScalingPolicy::Exact64, 8192)?;
    let mut scaled = converter(src, dst, ScalingPolicy::Scaled32, 8192)?;
    let ratio = exact.plan().unwrap().ratio();
    assert_eq!(ratio, scaled.plan().unwrap().ratio());
    assert_eq!(
        ConversionStrategy::Scaled32,
        scaled.plan().unwrap().strategy()
    );

    // Across the wrap the input step is WRAP - 1, and the scaled weights fall
    // short of the exact ones by at most the gain deficit of the scale/roll.
    let sr = scaled.plan().unwrap().scale_roll().unwrap();
    let unit = 1i64 << sr.roll();
    let deficit = unit - i64::from(sr.scale()) * i64::from(ratio.gy());
    let wrap_bound = i64::from(WRAP - 1) * deficit / unit + 2;

    let expect = decode(&drain(&mut exact, &mut SliceSource::new(&input), 1000)?);
    let got = decode(&drain(&mut scaled, &mut SliceSource::new(&input), 1000)?);
    assert!(!expect.is_empty());
    assert_eq!(expect.len(), got.len());

    let mut wraps = 0;
    for ch in 0..2 {
        let e = channel(&expect, ch);
        let g = channel(&got, ch);
        e.iter().zip_eq(g.iter()).enumerate().for_each(|(i, (&e_i, &g_i))| {
            let jump = |j: usize| e.get(j).is_some_and(|&x| (x - e_i).abs() > 1000);
            let near_wrap = (i > 0 && jump(i - 1)) || jump(i + 1);
            let diff = (e_i - g_i).abs();
            if near_wrap {
                wraps += 1;
                assert!(diff <= wrap_bound, "ch {ch} sample {i}: {e_i} vs {g_i}");
            } else {
                assert!(diff <= 1, "ch {ch} sample {i}: {e_i} vs {g_i}");
            }
        });
    }
    assert!(wraps > 0);
    Ok(())
}
