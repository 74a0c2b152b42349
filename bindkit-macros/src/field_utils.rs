use syn::{Field, FieldsNamed, Token, Type, punctuated::Punctuated};

pub(crate) fn has_field_named(fields_named: &FieldsNamed, name: &str) -> bool {
    fields_named
        .named
        .iter()
        .any(|f| f.ident.as_ref().map(|i| i == name).unwrap_or(false))
}

/// 确保具名字段结构体包含所需字段
/// - 缺失时以给定类型新增并置于最前；已存在则保留原定义与原有顺序
pub(crate) fn ensure_field(fields_named: &mut FieldsNamed, name: &str, ty: &Type) {
    if has_field_named(fields_named, name) {
        return;
    }

    let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
    let field: Field = syn::parse_quote! { #ident: #ty };

    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();
    new_named.push(field);
    for f in fields_named.named.clone().into_iter() {
        new_named.push(f);
    }

    fields_named.named = new_named;
}
