use super::*;
use crate::inspector::{constructor_fields, nested_class_name, type_with_generics};
use crate::names::{BUILDER, CopyableAnnotation, WITHER, capitalize, decapitalize};
use crate::processor::field::{second_wither_name, wither_name};
use crate::synth::{LightMethodBuilder, copy_annotations};
use jv_lombok_ast::{
    AnnotationModel, AnnotationValue, ClassModel, FieldModel, JavaType, SourceTree, Visibility,
};
use jv_lombok_codegen::{JavaBlock, JavaExpr};

fn tree_of(model: ClassModel) -> SourceTree {
    SourceTree::from_models(&[model]).expect("valid model")
}

#[test]
fn markers_match_qualified_and_simple_spellings() {
    let tree = tree_of(
        ClassModel::new("Sample")
            .annotated(AnnotationModel::new("lombok.experimental.Builder"))
            .annotated(AnnotationModel::new("Builder"))
            .annotated(AnnotationModel::new("other.Builder")),
    );
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    let matched: Vec<bool> = tree
        .annotations_of(class.id)
        .into_iter()
        .map(|annotation| BUILDER.matches(annotation))
        .collect();
    assert_eq!(matched, vec![true, true, false]);
    assert_eq!(WITHER.simple_name(), "Wither");
}

#[test]
fn wither_names() {
    assert_eq!(wither_name("x"), "withX");
    assert_eq!(wither_name("isActive"), "withActive");
    assert_eq!(wither_name("island"), "withIsland");
    assert_eq!(wither_name("is"), "withIs");
    assert_eq!(second_wither_name("isActive"), "withIsActive");
    assert_eq!(capitalize(""), "");
    assert_eq!(decapitalize("Name"), "name");
}

#[test]
fn accessor_prefixes_are_removed_before_naming() {
    let info = AccessorsInfo {
        fluent: false,
        chain: false,
        prefixes: vec!["m".into(), "_".into()],
    };
    assert_eq!(info.remove_prefix("mName"), "name");
    assert_eq!(info.remove_prefix("mode"), "mode");
    assert_eq!(info.remove_prefix("_value"), "value");
    assert_eq!(info.remove_prefix("m"), "m");
}

#[test]
fn accessors_resolve_from_field_then_class_then_config() {
    let tree = tree_of(
        ClassModel::new("Sample")
            .annotated(
                AnnotationModel::new("lombok.experimental.Accessors")
                    .with("prefix", AnnotationValue::string("f")),
            )
            .with_field(FieldModel::new("fName", JavaType::string()))
            .with_field(
                FieldModel::new("mAge", JavaType::int()).annotated(
                    AnnotationModel::new("lombok.experimental.Accessors")
                        .with("prefix", AnnotationValue::strings(["m"]))
                        .with("fluent", AnnotationValue::boolean(true)),
                ),
            ),
    );
    let defaults = AccessorDefaults::default();
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    let fields: Vec<_> = tree.fields_of(class).collect();

    let class_level = AccessorsInfo::build(&tree, fields[0], &defaults);
    assert_eq!(class_level.prefixes, vec!["f"]);
    assert_eq!(class_level.getter_name(fields[0]), "getName");

    let field_level = AccessorsInfo::build(&tree, fields[1], &defaults);
    assert!(field_level.fluent && field_level.chain);
    assert_eq!(field_level.getter_name(fields[1]), "age");
}

#[test]
fn config_parses_sections_and_rejects_unknown_processors() {
    let config = AugmentConfig::from_toml_str(
        r#"
[processors]
wither = false

[accessors]
prefix = ["m"]

[equals_and_hash_code]
call_super_warning = false
"#,
    )
    .expect("valid config");
    assert!(!config.is_enabled("wither"));
    assert!(config.is_enabled("builder"));
    assert_eq!(config.accessors.prefix, vec!["m"]);
    assert!(!config.equals_and_hash_code.call_super_warning);

    let error = AugmentConfig::from_toml_str("[processors]\ngetter = true\n").unwrap_err();
    assert!(matches!(error, ConfigError::UnknownProcessor(ref key) if key == "getter"));
    assert!(AugmentConfig::from_toml_str("processors = 3").is_err());
}

#[test]
fn constructor_fields_skip_initialized_finals() {
    let tree = tree_of(
        ClassModel::new("Sample")
            .with_field(FieldModel::new("a", JavaType::int()))
            .with_field(FieldModel::new("LIMIT", JavaType::int()).with_static().with_final())
            .with_field(FieldModel::new("b", JavaType::int()).with_final().with_initializer("1"))
            .with_field(FieldModel::new("c", JavaType::int()).with_final())
            .with_field(FieldModel::new("$lock", JavaType::object())),
    );
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    let names: Vec<&str> = constructor_fields(&tree, class)
        .into_iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn class_types_carry_generics() {
    let tree = tree_of(
        ClassModel::new("Pair")
            .in_package("util")
            .with_type_parameter("A")
            .with_type_parameter("B")
            .with_inner_class(ClassModel::new("Entry")),
    );
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    assert_eq!(type_with_generics(class).canonical_text(), "util.Pair<A, B>");
    let inner = tree.inner_classes_of(class).next().unwrap();
    assert_eq!(nested_class_name(&tree, inner), "Pair.Entry");
}

#[test]
fn copied_annotations_keep_source_order() {
    let tree = tree_of(ClassModel::new("Sample").with_field(
        FieldModel::new("a", JavaType::string())
            .annotated(AnnotationModel::new("java.lang.Deprecated"))
            .annotated(AnnotationModel::new("lombok.experimental.Wither"))
            .annotated(AnnotationModel::new("javax.annotation.Nullable")),
    ));
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    let field = tree.fields_of(class).next().unwrap();
    assert_eq!(
        copy_annotations(&tree, field.id, &CopyableAnnotation::ALL),
        vec!["java.lang.Deprecated", "javax.annotation.Nullable"]
    );
    assert!(copy_annotations(&tree, field.id, &[CopyableAnnotation::NonNull]).is_empty());
}

#[test]
fn member_source_includes_annotations_and_body() {
    let tree = tree_of(ClassModel::new("Sample"));
    let class = tree.top_level_classes()[0];
    let member = LightMethodBuilder::new("size", class, NavigationTarget::Annotation(class))
        .with_visibility(Visibility::Public)
        .with_return_type(JavaType::int())
        .with_annotations(vec!["java.lang.Deprecated".into()])
        .with_body(JavaBlock::returning(JavaExpr::int(0)))
        .build();
    assert_eq!(member.signature(), "public int size()");
    assert_eq!(
        member.to_java_source(),
        "@java.lang.Deprecated\npublic int size() {\n    return 0;\n}\n"
    );
}

#[test]
fn quick_fix_titles() {
    let tree = tree_of(ClassModel::new("Sample").annotated(AnnotationModel::new("lombok.ToString")));
    let class = tree.class(tree.top_level_classes()[0]).unwrap();
    let annotation = tree.annotations_of(class.id)[0];
    assert_eq!(
        QuickFix::change_annotation_parameter(annotation, "callSuper", Some("true".into())).title(),
        "Change 'callSuper' to 'true'"
    );
    assert_eq!(
        QuickFix::modifier(class.id, jv_lombok_ast::Modifier::Static, false).title(),
        "Remove 'static' modifier"
    );
}
