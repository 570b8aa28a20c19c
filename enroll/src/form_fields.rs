/// Create an enum that can be iterated over with tab/shift-tab. The first
/// listed field starts focused.
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $first:ident $(, $rest:ident)*) => {
        #[derive(Debug, Clone, Copy)]
        pub enum $name {
            $first
            $(, $rest)*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl $name {
            const FIELDS: &'static [$name] = &[
                $name::$first
                $(, $name::$rest)*
            ];

            fn index(&self) -> usize {
                match self {
                    Self::$first => $name::$first as usize
                    $(, Self::$rest => $name::$rest as usize)*
                }
            }

            /// Rotate through the options (e.g. with tab)
            fn next(&self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// Rotate through the options in reverse (e.g. with shift-tab)
            fn prev(&self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }
        }
    };
}
