// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use std::str::FromStr;
use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, SamplingMode};

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned from `PROFILE_FREQ`, `BENCH_SAMPLE_SIZE`, `BENCH_WARMUP_SECS` and
/// `BENCH_MEASUREMENT_SECS`, with a flamegraph profiler attached.
///
/// The defaults fit `partition.row` and `render.zoom`, whose iterations stay well under a
/// millisecond even for the `large` case.
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_or::<usize>("BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs = env_or::<u64>("BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs = env_or::<u64>("BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}

/// Settings for groups that rebuild a whole grid per iteration (`render.grid`).
///
/// A `large` iteration creates 60 views and styles 24k records, so the shared defaults cannot
/// fit 60 linear samples into 5 s. Flat sampling with fewer, longer samples keeps the run
/// bounded. Overridable via `BENCH_GRID_SAMPLE_SIZE` and `BENCH_GRID_MEASUREMENT_SECS`.
pub fn tune_full_render(group: &mut BenchmarkGroup<'_, WallTime>) {
    let sample_size = env_or::<usize>("BENCH_GRID_SAMPLE_SIZE", 20).clamp(10, 200);
    let measurement_secs = env_or::<u64>("BENCH_GRID_MEASUREMENT_SECS", 12).clamp(1, 300);

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(sample_size)
        .measurement_time(Duration::from_secs(measurement_secs));
}
