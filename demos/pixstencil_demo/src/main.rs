use argh::FromArgs;

use pixstencil::image::{Image, ImageError};
use pixstencil::imgproc::{features, filter, status};

#[derive(Debug, Clone, Copy)]
enum Filter {
    Box,
    Gaussian,
    Sobel,
    Laplace,
    Harris,
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(Filter::Box),
            "gaussian" => Ok(Filter::Gaussian),
            "sobel" => Ok(Filter::Sobel),
            "laplace" => Ok(Filter::Laplace),
            "harris" => Ok(Filter::Harris),
            _ => Err(format!(
                "unknown filter `{s}`, expected box, gaussian, sobel, laplace or harris"
            )),
        }
    }
}

#[derive(FromArgs)]
/// Run a stencil filter over a synthetic RGBA image
struct Args {
    /// filter to run: box, gaussian, sobel, laplace or harris
    #[argh(option, short = 'f', default = "Filter::Harris")]
    filter: Filter,

    /// kernel size, applied to both axes
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,

    /// width of the synthetic image
    #[argh(option, default = "64")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "48")]
    height: usize,
}

// dark background with a bright rectangle over the middle third
fn synthetic_image(width: usize, height: usize) -> Result<Image<u8, 4>, ImageError> {
    let data = [20, 20, 20, 255].repeat(width * height);
    let mut img = Image::<u8, 4>::new([width, height].into(), data)?;
    for y in height / 3..2 * height / 3 {
        for x in width / 3..2 * width / 3 {
            img.pixel_mut(x, y).copy_from_slice(&[230, 200, 180, 255]);
        }
    }
    Ok(img)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    let kernel_size = (args.kernel_size, args.kernel_size);

    let src = synthetic_image(args.width, args.height)?;
    let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0)?;

    let result = match args.filter {
        Filter::Box => filter::box_blur(&src, &mut dst, kernel_size),
        Filter::Gaussian => filter::gaussian_blur(&src, &mut dst, kernel_size),
        Filter::Sobel => filter::sobel(&src, &mut dst, kernel_size),
        Filter::Laplace => filter::laplace(&src, &mut dst, kernel_size),
        Filter::Harris => {
            let config = features::HarrisConfig::default();
            features::harris_corners(&src, &mut dst, kernel_size, &config).map(|corners| {
                for c in corners.iter() {
                    println!("corner at ({}, {}) score {:.1}", c.x, c.y, c.score);
                }
            })
        }
    };

    println!(
        "{:?} {}x{}: status {}",
        args.filter,
        kernel_size.0,
        kernel_size.1,
        status::status_code(&result)
    );

    if let Err(e) = result {
        log::warn!("{e}");
        return Ok(());
    }

    let changed = src
        .as_slice()
        .chunks_exact(4)
        .zip(dst.as_slice().chunks_exact(4))
        .filter(|(a, b)| a != b)
        .count();
    println!("{changed} of {} pixels changed", src.cols() * src.rows());

    Ok(())
}
