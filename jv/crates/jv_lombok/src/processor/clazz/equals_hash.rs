use crate::inspector::{collect_class_methods, has_similar_method, type_with_wildcards};
use crate::names::{EQUALS_AND_HASH_CODE, Marker};
use crate::problem::ProblemSink;
use crate::processor::support::{
    FieldAccess, filter_fields, validate_call_super_param, validate_exclude_param,
    validate_of_param,
};
use crate::processor::{ClassProcessor, ProcessContext};
use crate::synth::{LightMethodBuilder, NavigationTarget, VirtualElement};
use jv_lombok_ast::{Annotation, ClassDecl, ClassKind, FieldDecl, JavaType, Visibility};
use jv_lombok_codegen::{BinaryOp, JavaBlock, JavaExpr, JavaStmt};

const PRIME: i64 = 59;
const TRUE_HASH: i64 = 79;
const FALSE_HASH: i64 = 97;
const NULL_HASH: i64 = 43;

/// `@EqualsAndHashCode`: `equals`, `hashCode` and `canEqual`.
#[derive(Debug, Default)]
pub struct EqualsAndHashCodeProcessor;

impl ClassProcessor for EqualsAndHashCodeProcessor {
    fn key(&self) -> &'static str {
        "equals_and_hash_code"
    }

    fn marker(&self) -> &'static Marker {
        &EQUALS_AND_HASH_CODE
    }

    fn validate(
        &self,
        cx: &ProcessContext<'_>,
        annotation: &Annotation,
        class: &ClassDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool {
        if class.kind != ClassKind::Class {
            sink.add_error(
                format!(
                    "'@{}' is only supported on a class type",
                    EQUALS_AND_HASH_CODE.simple_name()
                ),
                Vec::new(),
            );
            return false;
        }

        let mut valid = true;
        let of = annotation.string_list_attribute("of");
        let exclude = annotation.string_list_attribute("exclude");
        validate_of_param(cx.tree, class, sink, annotation, &of);
        validate_exclude_param(cx.tree, class, sink, annotation, &exclude, &of);

        if cx.config.equals_and_hash_code.call_super_warning {
            validate_call_super_param(annotation, class, sink, "equals/hashCode");
        }
        if annotation.bool_attribute_or("callSuper", false) && !class.has_explicit_super_class() {
            sink.add_error(
                "Generating equals/hashCode with a supercall to java.lang.Object is pointless."
                    .to_string(),
                Vec::new(),
            );
            valid = false;
        }

        let methods = collect_class_methods(cx.tree, class);
        if has_similar_method(&methods, "equals", 1) || has_similar_method(&methods, "hashCode", 0) {
            sink.add_warning(
                "Not generating equals and hashCode: A method with one of those names already exists. \
                 (Either both or none of these methods will be generated)."
                    .to_string(),
                Vec::new(),
            );
            valid = false;
        }
        valid
    }

    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        class: &ClassDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    ) {
        let navigation = NavigationTarget::Annotation(annotation.id);
        let call_super = annotation.bool_attribute_or("callSuper", false);
        let do_not_use_getters = annotation.bool_attribute_or("doNotUseGetters", false);
        let fields: Vec<(&FieldDecl, FieldAccess)> = filter_fields(cx.tree, class, annotation, true)
            .into_iter()
            .map(|field| {
                let access = FieldAccess::resolve(cx, do_not_use_getters, field, class);
                (field, access)
            })
            .collect();

        let methods = collect_class_methods(cx.tree, class);
        let needs_can_equal = !class.modifiers.is_final || class.has_explicit_super_class();
        let generate_can_equal = needs_can_equal && !has_similar_method(&methods, "canEqual", 1);

        let equals = LightMethodBuilder::new("equals", class.id, navigation)
            .with_visibility(Visibility::Public)
            .with_return_type(JavaType::boolean())
            .with_final_parameter("o", JavaType::object())
            .with_body(equals_body(class, &fields, call_super, needs_can_equal))
            .build();
        target.push(VirtualElement::Member(equals));

        let hash_code = LightMethodBuilder::new("hashCode", class.id, navigation)
            .with_visibility(Visibility::Public)
            .with_return_type(JavaType::int())
            .with_body(hash_code_body(&fields, call_super))
            .build();
        target.push(VirtualElement::Member(hash_code));

        if generate_can_equal {
            let can_equal = LightMethodBuilder::new("canEqual", class.id, navigation)
                .with_visibility(Visibility::Protected)
                .with_return_type(JavaType::boolean())
                .with_final_parameter("other", JavaType::object())
                .with_body(JavaBlock::returning(JavaExpr::instance_of(
                    JavaExpr::ident("other"),
                    JavaType::reference(class.qualified_name.clone()),
                )))
                .build();
            target.push(VirtualElement::Member(can_equal));
        }
    }
}

fn return_false_if(condition: JavaExpr) -> JavaStmt {
    JavaStmt::if_then(condition, JavaStmt::Return(JavaExpr::boolean(false)))
}

fn equals_body(
    class: &ClassDecl,
    fields: &[(&FieldDecl, FieldAccess)],
    call_super: bool,
    needs_can_equal: bool,
) -> JavaBlock {
    let raw_type = JavaType::reference(class.qualified_name.clone());
    let other_type = type_with_wildcards(class);
    let other = || JavaExpr::ident("other");

    let mut statements = vec![
        JavaStmt::if_then(
            JavaExpr::eq(JavaExpr::ident("o"), JavaExpr::This),
            JavaStmt::Return(JavaExpr::boolean(true)),
        ),
        return_false_if(JavaExpr::not(JavaExpr::instance_of(JavaExpr::ident("o"), raw_type))),
        JavaStmt::final_local(
            other_type.clone(),
            "other",
            JavaExpr::cast(other_type, JavaExpr::ident("o")),
        ),
    ];
    if needs_can_equal {
        statements.push(return_false_if(JavaExpr::not(JavaExpr::call(
            other(),
            "canEqual",
            vec![JavaExpr::cast(JavaType::object(), JavaExpr::This)],
        ))));
    }
    if call_super {
        statements.push(return_false_if(JavaExpr::not(JavaExpr::call(
            JavaExpr::Super,
            "equals",
            vec![JavaExpr::ident("o")],
        ))));
    }

    for (field, access) in fields {
        let mine = access.on(JavaExpr::This);
        let theirs = access.on(other());
        match field.ty.primitive_name() {
            Some("float") => statements.push(return_false_if(JavaExpr::ne(
                JavaExpr::static_call("java.lang.Float", "compare", vec![mine, theirs]),
                JavaExpr::int(0),
            ))),
            Some("double") => statements.push(return_false_if(JavaExpr::ne(
                JavaExpr::static_call("java.lang.Double", "compare", vec![mine, theirs]),
                JavaExpr::int(0),
            ))),
            Some(_) => statements.push(return_false_if(JavaExpr::ne(mine, theirs))),
            None if field.ty.is_array() => {
                let method = if field.ty.is_object_array() { "deepEquals" } else { "equals" };
                statements.push(return_false_if(JavaExpr::not(JavaExpr::static_call(
                    "java.util.Arrays",
                    method,
                    vec![mine, theirs],
                ))));
            }
            None => {
                let this_name = format!("this${}", field.name);
                let other_name = format!("other${}", field.name);
                statements.push(JavaStmt::final_local(JavaType::object(), &this_name, mine));
                statements.push(JavaStmt::final_local(JavaType::object(), &other_name, theirs));
                statements.push(return_false_if(JavaExpr::conditional(
                    JavaExpr::eq(JavaExpr::ident(&this_name), JavaExpr::null()),
                    JavaExpr::ne(JavaExpr::ident(&other_name), JavaExpr::null()),
                    JavaExpr::not(JavaExpr::call(
                        JavaExpr::ident(&this_name),
                        "equals",
                        vec![JavaExpr::ident(&other_name)],
                    )),
                )));
            }
        }
    }

    statements.push(JavaStmt::Return(JavaExpr::boolean(true)));
    JavaBlock::new(statements)
}

fn accumulate(term: JavaExpr) -> JavaStmt {
    JavaStmt::assign(
        JavaExpr::ident("result"),
        JavaExpr::binary(
            BinaryOp::Add,
            JavaExpr::binary(
                BinaryOp::Multiply,
                JavaExpr::ident("result"),
                JavaExpr::ident("PRIME"),
            ),
            term,
        ),
    )
}

/// `(int) ($x >>> 32 ^ $x)`
fn fold_long(name: &str) -> JavaExpr {
    JavaExpr::cast(
        JavaType::int(),
        JavaExpr::binary(
            BinaryOp::BitXor,
            JavaExpr::binary(
                BinaryOp::UnsignedShiftRight,
                JavaExpr::ident(name),
                JavaExpr::int(32),
            ),
            JavaExpr::ident(name),
        ),
    )
}

fn hash_code_body(fields: &[(&FieldDecl, FieldAccess)], call_super: bool) -> JavaBlock {
    let mut statements = Vec::new();
    if call_super || !fields.is_empty() {
        statements.push(JavaStmt::final_local(JavaType::int(), "PRIME", JavaExpr::int(PRIME)));
    }
    statements.push(JavaStmt::local(JavaType::int(), "result", JavaExpr::int(1)));
    if call_super {
        statements.push(accumulate(JavaExpr::call(JavaExpr::Super, "hashCode", Vec::new())));
    }

    for (field, access) in fields {
        let value = access.on(JavaExpr::This);
        let local = format!("${}", field.name);
        match field.ty.primitive_name() {
            Some("boolean") => statements.push(accumulate(JavaExpr::conditional(
                value,
                JavaExpr::int(TRUE_HASH),
                JavaExpr::int(FALSE_HASH),
            ))),
            Some("long") => {
                statements.push(JavaStmt::final_local(JavaType::primitive("long"), &local, value));
                statements.push(accumulate(fold_long(&local)));
            }
            Some("float") => statements.push(accumulate(JavaExpr::static_call(
                "java.lang.Float",
                "floatToIntBits",
                vec![value],
            ))),
            Some("double") => {
                statements.push(JavaStmt::final_local(
                    JavaType::primitive("long"),
                    &local,
                    JavaExpr::static_call("java.lang.Double", "doubleToLongBits", vec![value]),
                ));
                statements.push(accumulate(fold_long(&local)));
            }
            Some(_) => statements.push(accumulate(value)),
            None if field.ty.is_array() => {
                let method = if field.ty.is_object_array() { "deepHashCode" } else { "hashCode" };
                statements.push(accumulate(JavaExpr::static_call(
                    "java.util.Arrays",
                    method,
                    vec![value],
                )));
            }
            None => {
                statements.push(JavaStmt::final_local(JavaType::object(), &local, value));
                statements.push(accumulate(JavaExpr::conditional(
                    JavaExpr::eq(JavaExpr::ident(&local), JavaExpr::null()),
                    JavaExpr::int(NULL_HASH),
                    JavaExpr::call(JavaExpr::ident(&local), "hashCode", Vec::new()),
                )));
            }
        }
    }

    statements.push(JavaStmt::Return(JavaExpr::ident("result")));
    JavaBlock::new(statements)
}
