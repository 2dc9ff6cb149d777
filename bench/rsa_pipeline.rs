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

use textbook_rsa::keygen::generate_keypair;
use textbook_rsa::padding::PaddingKind;
use textbook_rsa::pipeline::{decrypt_bytes_crt, encrypt_bytes};

fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(99);
    let (public, private) = generate_keypair(1024, 10, &mut rng).unwrap();
    let data = vec![0x42u8; 4096];

    c.bench_function("encrypt_bytes/1024/pkcs1v15", |b| {
        b.iter(|| {
            black_box(
                encrypt_bytes(&data, &public.e, &public.n, PaddingKind::Pkcs1v15, &mut rng)
                    .unwrap(),
            )
        });
    });

    let records = encrypt_bytes(&data, &public.e, &public.n, PaddingKind::Pkcs1v15, &mut rng)
        .unwrap();
    c.bench_function("decrypt_bytes_crt/1024/pkcs1v15", |b| {
        b.iter(|| black_box(decrypt_bytes_crt(&records, &private, PaddingKind::Pkcs1v15).unwrap()));
    });
}

criterion_group!(benches, bench_encrypt_decrypt);
criterion_main!(benches);
