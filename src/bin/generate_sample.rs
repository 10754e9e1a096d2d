use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a reference/test pair of RCS plot files for trying out `rcs-rmse`.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory receiving reference.plt and test.plt
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write 9-field bistatic rows instead of 7-field monostatic rows
    #[arg(long)]
    bistatic: bool,

    /// Standard deviation of the perturbation added to the test file (dB and degrees)
    #[arg(long, default_value_t = 1e-4)]
    noise: f64,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Smooth synthetic RCS pattern in dBsm and degrees.
fn pattern(freq: f64, theta: f64, phi: f64) -> (f64, f64, f64, f64) {
    let (t, p) = (theta.to_radians(), phi.to_radians());
    let pp_db = -10.0 + 8.0 * (freq * t).cos() - 3.0 * p.sin().powi(2);
    let tt_db = -12.0 + 6.0 * (0.5 * freq * t).sin() + 2.0 * p.cos();
    let pp_phase = (360.0 * freq * t.cos()).rem_euclid(360.0) - 180.0;
    let tt_phase = (360.0 * freq * p.sin() + 90.0).rem_euclid(360.0) - 180.0;
    (pp_db, pp_phase, tt_db, tt_phase)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let frequencies = [1.0, 2.0, 5.0, 10.0];
    let thetas: Vec<f64> = (0..=18).map(|i| i as f64 * 10.0).collect();
    let phis = [0.0, 45.0, 90.0];
    let incidences = [(0.0, 0.0), (30.0, 0.0)];

    let header = if args.bistatic {
        "# freq theta phi inc_theta inc_phi pp_dBsm pp_phase tt_dBsm tt_phase\n"
    } else {
        "# freq theta phi pp_dBsm pp_phase tt_dBsm tt_phase\n"
    };
    let mut reference = String::from(header);
    let mut test = String::from(header);
    let mut rows = 0usize;

    for &freq in &frequencies {
        for &theta in &thetas {
            for &phi in &phis {
                let directions: &[(f64, f64)] = if args.bistatic { &incidences } else { &[(0.0, 0.0)] };
                for &(inc_theta, inc_phi) in directions {
                    let (pp_db, pp_ph, tt_db, tt_ph) = pattern(freq, theta + inc_theta, phi + inc_phi);
                    let coords = if args.bistatic {
                        format!("{freq} {theta} {phi} {inc_theta} {inc_phi}")
                    } else {
                        format!("{freq} {theta} {phi}")
                    };
                    writeln!(reference, "{coords} {pp_db:.8} {pp_ph:.8} {tt_db:.8} {tt_ph:.8}")?;
                    writeln!(
                        test,
                        "{coords} {:.8} {:.8} {:.8} {:.8}",
                        pp_db + rng.gauss(0.0, args.noise),
                        pp_ph + rng.gauss(0.0, args.noise),
                        tt_db + rng.gauss(0.0, args.noise),
                        tt_ph + rng.gauss(0.0, args.noise),
                    )?;
                    rows += 1;
                }
            }
        }
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let reference_path = args.out_dir.join("reference.plt");
    let test_path = args.out_dir.join("test.plt");
    std::fs::write(&reference_path, reference)
        .with_context(|| format!("writing {}", reference_path.display()))?;
    std::fs::write(&test_path, test).with_context(|| format!("writing {}", test_path.display()))?;

    println!(
        "Wrote {rows} samples ({} frequencies) to {} and {}",
        frequencies.len(),
        reference_path.display(),
        test_path.display()
    );
    Ok(())
}
