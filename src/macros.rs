/// Declare OpenGL entry point descriptors, along with a list of all of them.
///
/// ```
/// dynamic_gl::symbols! {
///     /// Entry points used by the renderer
///     RENDERER_SYMBOLS;
///
///     glClear = ["+1.0"],
///     glGenVertexArrays = ["+3.0", "ARB_vertex_array_object"],
/// }
///
/// assert_eq!(RENDERER_SYMBOLS.len(), 2);
/// assert_eq!(glClear.name(), "glClear");
/// ```
#[macro_export]
macro_rules! symbols {
    (
        $( #[ $outer:meta ] )*
        $all:ident;

        $(
            $( #[ $attr:meta ] )*
            $name:ident = [ $( $tag:expr ),* $(,)? ]
        ),* $(,)?
    ) => {
        $(
            $( #[ $attr ] )*
            #[allow(non_upper_case_globals)]
            pub const $name: $crate::SymbolDescriptor =
                $crate::SymbolDescriptor::new(stringify!($name), &[ $( $tag ),* ]);
        )*

        $( #[ $outer ] )*
        pub const $all: &[$crate::SymbolDescriptor] = &[ $( $name ),* ];
    };
}
