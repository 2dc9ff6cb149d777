// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use textbook_rsa::primes::{generate_prime, DEFAULT_ROUNDS};

fn bench_generate_prime(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_prime");
    for bits in [256u32, 512, 1024] {
        group.bench_function(format!("{}-bit", bits), |b| {
            let mut rng = StdRng::seed_from_u64(bits as u64);
            b.iter(|| black_box(generate_prime(bits, DEFAULT_ROUNDS, &mut rng)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_prime);
criterion_main!(benches);
