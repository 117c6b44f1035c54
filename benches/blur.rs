use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gaussbox::blur::{blur_image_surface, gaussian_blur};
use gaussbox::surface::{ImageSurface, PixelFormat};

fn patterned(w: usize, h: usize) -> Vec<u8> {
    (0..w * h * 4).map(|i| (i * 31 % 251) as u8).collect()
}

fn bench_gaussian_blur(c: &mut Criterion) {
    let w = 256;
    let h = 256;
    let src = patterned(w, h);

    for sigma in [2.0, 8.0, 24.0] {
        c.bench_function(&format!("gaussian_blur 256x256 sigma {sigma}"), |b| {
            b.iter(|| {
                let mut img = src.clone();
                let mut tmp = vec![0u8; w * h * 4];
                gaussian_blur(black_box(&mut img), &mut tmp, w, h, sigma);
                img
            })
        });
    }
}

fn bench_blur_image_surface(c: &mut Criterion) {
    let mut template = ImageSurface::new(PixelFormat::Argb32, 256, 256);
    template.data_mut().copy_from_slice(&patterned(256, 256));

    c.bench_function("blur_image_surface 256x256 sigma 8", |b| {
        b.iter(|| {
            let mut surface = ImageSurface::from_data(
                template.data().to_vec(),
                PixelFormat::Argb32,
                256,
                256,
                1024,
            )
            .unwrap();
            blur_image_surface(black_box(&mut surface), 8.0).unwrap();
            surface
        })
    });
}

criterion_group!(benches, bench_gaussian_blur, bench_blur_image_surface);
criterion_main!(benches);
