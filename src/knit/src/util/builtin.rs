use std::any::TypeId;

macro_rules! type_ids {
    ($($ty:ty),* $(,)?) => {
        [$(TypeId::of::<$ty>()),*]
    };
}

/// Returns true if `id` belongs to a primitive or standard library value type.
///
/// Such types have no constructor signature the injector could resolve, so
/// they can only ever be provided through an explicit binding.
pub(crate) fn is_builtin(id: TypeId) -> bool {
    type_ids![
        (),
        bool,
        char,
        i8,
        i16,
        i32,
        i64,
        i128,
        isize,
        u8,
        u16,
        u32,
        u64,
        u128,
        usize,
        f32,
        f64,
        String,
        &'static str,
    ]
    .contains(&id)
}
