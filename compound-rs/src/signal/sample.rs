use rustfft::num_complex::Complex;

/// Element types accepted as input samples by spectral operations computed in `F` precision.
///
/// Real samples are lifted onto the real axis. Integer samples cover raw RF data as it leaves
/// acquisition hardware.
pub trait SpectralSample<F>: Copy {
    /// Convert the sample into a complex value.
    fn to_complex(self) -> Complex<F>;
}

macro_rules! real_sample {
    ($($sample:ty => $float:ty),* $(,)?) => {
        $(
            impl SpectralSample<$float> for $sample {
                #[inline]
                fn to_complex(self) -> Complex<$float> {
                    Complex::new(self as $float, 0.0)
                }
            }
        )*
    };
}

real_sample!(
    f32 => f32,
    f32 => f64,
    f64 => f64,
    i16 => f32,
    i16 => f64,
    i32 => f32,
    i32 => f64,
);

impl SpectralSample<f32> for Complex<f32> {
    #[inline]
    fn to_complex(self) -> Complex<f32> {
        self
    }
}

impl SpectralSample<f64> for Complex<f64> {
    #[inline]
    fn to_complex(self) -> Complex<f64> {
        self
    }
}

impl SpectralSample<f64> for Complex<f32> {
    #[inline]
    fn to_complex(self) -> Complex<f64> {
        Complex::new(self.re as f64, self.im as f64)
    }
}
