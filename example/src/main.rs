use densemat::{mat, GrayView, MatError, MatResult, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

fn rotate_image(input: &str, output: &str) -> MatResult<()> {
    let img = image::open(input)
        .map_err(|e| MatError::Unexpected(format!("open {}: {}", input, e)))?
        .to_luma8();
    let (w, h) = img.dimensions();
    let view = GrayView::new(img.as_raw(), w, h, w as usize)?;

    let m = Matrix::<f32>::from_gray8_normalized(&view);
    let rotated = m.rotate_clockwise_90().flip_horizontal();
    let gray = rotated.to_gray8_normalized(rotated.cols() as usize)?;

    let out = image::GrayImage::from_raw(gray.width, gray.height, gray.data)
        .ok_or_else(|| MatError::from("pixel buffer size"))?;
    out.save(output)
        .map_err(|e| MatError::Unexpected(format!("save {}: {}", output, e)))?;
    println!("{} ({}x{}) -> {}", input, w, h, output);
    Ok(())
}

fn main() -> MatResult<()> {
    let a = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let b = a.transpose();
    println!("a . a^T = {:?}", a.dot(&b)?);
    println!("a * 2 + 1 = {:?}", &(&a * 2.0) + 1.0);

    let mut r = Matrix::<f64>::zeros(3, 3);
    r.fill_random(&mut StdRng::seed_from_u64(7), -1.0, 1.0);
    println!("random {:?} min/max {:?}", r, r.min_max());

    let path = env::temp_dir().join("densemat-example.mat");
    r.save(&path)?;
    assert_eq!(Matrix::<f64>::load(&path)?, r);

    let args: Vec<String> = env::args().collect();
    if args.len() == 3 {
        rotate_image(&args[1], &args[2])?;
    }
    Ok(())
}
