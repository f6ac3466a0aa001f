use super::Formatter;

macro_rules! fmt {
    ($f:expr, $( $fragments:tt )*) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

pub(super) trait ToSql {
    fn to_sql(self, f: &mut Formatter<'_>);
}

impl ToSql for &str {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToSql for String {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self);
    }
}

impl ToSql for u32 {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if let Some(inner) = self {
            inner.to_sql(f);
        }
    }
}

macro_rules! impl_to_sql_for_tuple {
    ( $( $t:ident ),+ ) => {
        impl<$( $t: ToSql ),+> ToSql for ( $( $t, )+ ) {
            #[allow(non_snake_case)]
            fn to_sql(self, f: &mut Formatter<'_>) {
                let ( $( $t, )+ ) = self;
                $( $t.to_sql(f); )+
            }
        }
    };
}

impl_to_sql_for_tuple!(A, B);
impl_to_sql_for_tuple!(A, B, C);
impl_to_sql_for_tuple!(A, B, C, D);
impl_to_sql_for_tuple!(A, B, C, D, E);
impl_to_sql_for_tuple!(A, B, C, D, E, G);
impl_to_sql_for_tuple!(A, B, C, D, E, G, H);
