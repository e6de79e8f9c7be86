// SPDX-License-Identifier: MIT

/// Generates the `From` conversions between the error layers.
///
/// - `top`: each layer error converts into the umbrella error variant named
///   after it; `&'static str` converts into the umbrella `Other`.
/// - `sub`: a lower layer converts into the wrapping variant of each upper layer.
#[macro_export]
macro_rules! petrifs_error_wiring {
    (
        top => $top:ty {
            $($layer:ty : $layer_variant:ident),+ $(,)?
        },
        sub => {
            $($lower:ty => [ $($upper:ident::$upper_variant:ident),+ ] ),* $(,)?
        } $(,)?
    ) => {
        $(
            $crate::__petrifs_wrap_from!{ $layer => $top, $layer_variant }
        )+

        impl From<&'static str> for $top {
            #[inline]
            fn from(msg: &'static str) -> Self {
                <$top>::Other(msg)
            }
        }

        $(
            $(
                $crate::__petrifs_wrap_from!{ $lower => $upper, $upper_variant }
            )+
        )*
    };
}

/// `impl From<$src> for $dst` wrapping into `$dst::$variant`.
#[doc(hidden)]
#[macro_export]
macro_rules! __petrifs_wrap_from {
    ($src:ty => $dst:ty, $variant:ident) => {
        impl From<$src> for $dst {
            #[inline]
            fn from(e: $src) -> Self {
                <$dst>::$variant(e)
            }
        }
    };
}

/// Returns early with `$err` (converted through `Into`) unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// Returns early with `$err`, converted through `Into`.
#[macro_export]
macro_rules! bail {
    ($err:expr $(,)?) => {
        return Err($err.into())
    };
}
