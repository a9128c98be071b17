use crate::container::injector::{BoxError, InjectorError, Resolve, TypedResolve};
use crate::container::Managed;
use crate::provider::closure::Closure;

macro_rules! count {
    () => { 0usize };
    ($head:ident $(, $tail:ident)*) => { 1usize + count!($($tail),*) };
}

macro_rules! for_all_tuples {
    ($implementation:ident) => {
        $implementation!();
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
    };
}

macro_rules! impl_closure {
    ($($dep:ident),*) => {
        #[allow(non_snake_case, unused_variables)]
        impl<F, T, E, $($dep,)*> Closure<($($dep,)*)> for F
        where
            F: Fn($($dep,)*) -> Result<T, E> + 'static,
            T: 'static,
            E: Into<BoxError>,
            $($dep: Managed,)*
        {
            type Constructed = T;

            type Error = E;

            type Names = [&'static str; count!($($dep),*)];

            fn run(
                &self,
                names: &Self::Names,
                resolver: &dyn Resolve,
            ) -> Result<Result<Self::Constructed, Self::Error>, InjectorError> {
                let [$($dep,)*] = *names;
                $(
                    let $dep: $dep = resolver.param($dep)?;
                )*
                Ok(self($($dep,)*))
            }
        }
    };
}

for_all_tuples!(impl_closure);
