use super::*;
use insta::assert_snapshot;
use jv_lombok_ast::JavaType;

fn point_type() -> JavaType {
    JavaType::reference("geo.Point")
}

#[test]
fn wither_ternary_renders_without_extra_parentheses() {
    let expr = JavaExpr::conditional(
        JavaExpr::eq(JavaExpr::this_field("x"), JavaExpr::ident("x")),
        JavaExpr::This,
        JavaExpr::new_instance(
            point_type(),
            vec![JavaExpr::ident("x"), JavaExpr::this_field("y")],
        ),
    );
    assert_snapshot!(
        render_expression(&expr),
        @"this.x == x ? this : new geo.Point(x, this.y)"
    );
}

#[test]
fn negated_instanceof_is_parenthesized() {
    let expr = JavaExpr::not(JavaExpr::instance_of(
        JavaExpr::ident("o"),
        JavaType::reference("Point"),
    ));
    assert_snapshot!(render_expression(&expr), @"!(o instanceof Point)");
}

#[test]
fn hash_terms_keep_operator_precedence() {
    let long_hash = JavaExpr::cast(
        JavaType::int(),
        JavaExpr::binary(
            BinaryOp::BitXor,
            JavaExpr::binary(
                BinaryOp::UnsignedShiftRight,
                JavaExpr::ident("$id"),
                JavaExpr::int(32),
            ),
            JavaExpr::ident("$id"),
        ),
    );
    let accumulate = JavaExpr::binary(
        BinaryOp::Add,
        JavaExpr::binary(
            BinaryOp::Multiply,
            JavaExpr::ident("result"),
            JavaExpr::ident("PRIME"),
        ),
        long_hash,
    );
    assert_snapshot!(
        render_expression(&accumulate),
        @"result * PRIME + (int) ($id >>> 32 ^ $id)"
    );

    let nullable = JavaExpr::binary(
        BinaryOp::Add,
        JavaExpr::ident("result"),
        JavaExpr::conditional(
            JavaExpr::eq(JavaExpr::ident("$name"), JavaExpr::null()),
            JavaExpr::int(43),
            JavaExpr::call(JavaExpr::ident("$name"), "hashCode", vec![]),
        ),
    );
    assert_snapshot!(
        render_expression(&nullable),
        @"result + ($name == null ? 43 : $name.hashCode())"
    );
}

#[test]
fn right_nested_binary_keeps_grouping() {
    let expr = JavaExpr::binary(
        BinaryOp::Subtract,
        JavaExpr::ident("a"),
        JavaExpr::binary(BinaryOp::Subtract, JavaExpr::ident("b"), JavaExpr::ident("c")),
    );
    assert_snapshot!(render_expression(&expr), @"a - (b - c)");
}

#[test]
fn string_literals_are_escaped() {
    let expr = JavaExpr::string("say \"hi\"\n");
    assert_eq!(render_expression(&expr), r#""say \"hi\"\n""#);
}

#[test]
fn block_lowering_uses_single_line_guards() {
    let block = JavaBlock::new(vec![
        JavaStmt::if_then(
            JavaExpr::eq(JavaExpr::ident("o"), JavaExpr::This),
            JavaStmt::Return(JavaExpr::boolean(true)),
        ),
        JavaStmt::final_local(
            JavaType::object(),
            "this$name",
            JavaExpr::this_field("name"),
        ),
        JavaStmt::If {
            condition: JavaExpr::ident("dirty"),
            then_branch: vec![
                JavaStmt::assign(JavaExpr::this_field("name"), JavaExpr::null()),
                JavaStmt::Return(JavaExpr::boolean(false)),
            ],
        },
        JavaStmt::Return(JavaExpr::boolean(true)),
    ]);

    let expected = "\
if (o == this) return true;
final java.lang.Object this$name = this.name;
if (dirty) {
  this.name = null;
  return false;
}
return true;
";
    assert_eq!(render_block(&block, "  "), expected);
}

#[test]
fn source_builder_tracks_indentation() {
    let mut builder = JavaSourceBuilder::default();
    assert!(builder.is_empty());
    builder.push_line("class A {");
    builder.indent();
    builder.push_line("int x;");
    builder.dedent();
    builder.dedent();
    builder.push_line("}");
    assert_eq!(builder.build(), "class A {\n    int x;\n}\n");
}

#[test]
fn annotations_keep_their_arguments() {
    use jv_lombok_ast::{AnnotationModel, AnnotationValue, ClassModel, SourceTree};

    let model = ClassModel::new("Sample")
        .annotated(AnnotationModel::new("java.lang.Deprecated"))
        .annotated(
            AnnotationModel::new("Deprecated")
                .with("since", AnnotationValue::string("9"))
                .with("forRemoval", AnnotationValue::boolean(true)),
        )
        .annotated(
            AnnotationModel::new("Target")
                .with_value(AnnotationValue::Array(vec![
                    AnnotationValue::enum_constant("ElementType.FIELD"),
                    AnnotationValue::enum_constant("METHOD"),
                ])),
        );
    let tree = SourceTree::from_models(&[model]).unwrap();
    let rendered: Vec<String> = tree
        .annotations_of(tree.top_level_classes()[0])
        .into_iter()
        .map(render_annotation)
        .collect();
    assert_eq!(
        rendered,
        vec![
            "java.lang.Deprecated",
            "Deprecated(since = \"9\", forRemoval = true)",
            "Target({ElementType.FIELD, METHOD})",
        ]
    );
}
