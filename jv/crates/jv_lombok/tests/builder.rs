use jv_lombok::processor::BuilderProcessor;
use jv_lombok::{AugmentConfig, ElementKind, ProcessorRegistry, render_elements};
use jv_lombok_ast::{
    AnnotationModel, AnnotationValue, ClassKind, ClassModel, FieldModel, JavaType, MethodModel,
    NodeId, SourceTree,
};

fn person(builder: AnnotationModel) -> ClassModel {
    ClassModel::new("Person")
        .in_package("app")
        .annotated(builder)
        .with_field(FieldModel::new("name", JavaType::string()))
        .with_field(FieldModel::new("age", JavaType::int()))
}

fn lower(model: ClassModel) -> (SourceTree, NodeId) {
    let tree = SourceTree::from_models(&[model]).expect("valid model");
    let root = tree.top_level_classes()[0];
    (tree, root)
}

#[test]
fn builder_produces_holder_factory_and_constructor() {
    let (tree, class) = lower(person(AnnotationModel::new("lombok.Builder")));
    let registry = ProcessorRegistry::new();

    let kinds: Vec<(ElementKind, String)> = registry
        .process(&tree, class)
        .iter()
        .map(|element| (element.kind(), element.name().to_string()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ElementKind::Class, "PersonBuilder".to_string()),
            (ElementKind::Constructor, "Person".to_string()),
            (ElementKind::Method, "builder".to_string()),
        ]
    );

    let constructors = registry.augment(&tree, class, ElementKind::Constructor);
    assert_eq!(
        constructors[0].as_member().unwrap().signature(),
        "Person(final java.lang.String name, final int age)"
    );

    let factory = registry.augment(&tree, class, ElementKind::Method);
    assert_eq!(
        factory[0].to_java_source(),
        "public static app.Person.PersonBuilder builder() {\n    return new app.Person.PersonBuilder();\n}\n"
    );
}

#[test]
fn holder_class_source() {
    let (tree, class) = lower(person(AnnotationModel::new("lombok.Builder")));
    let holder = ProcessorRegistry::new().augment(&tree, class, ElementKind::Class);
    let expected = r#"public static class PersonBuilder {
    private java.lang.String name;
    private int age;
    PersonBuilder() {
    }
    public app.Person.PersonBuilder name(java.lang.String name) {
        this.name = name;
        return this;
    }
    public app.Person.PersonBuilder age(int age) {
        this.age = age;
        return this;
    }
    public app.Person build() {
        return new app.Person(this.name, this.age);
    }
    public java.lang.String toString() {
        return "Person.PersonBuilder(name=" + this.name + ", age=" + this.age + ")";
    }
}
"#;
    assert_eq!(render_elements(&holder), expected);
}

#[test]
fn custom_names_are_honored() {
    let annotation = AnnotationModel::new("lombok.Builder")
        .with("builderClassName", AnnotationValue::string("Maker"))
        .with("builderMethodName", AnnotationValue::string("create"))
        .with("buildMethodName", AnnotationValue::string("make"));
    let (tree, class) = lower(person(annotation));
    let elements = ProcessorRegistry::new().process(&tree, class);

    let holder = elements.iter().find_map(|element| element.as_class()).unwrap();
    assert_eq!(holder.qualified_name, "app.Person.Maker");
    assert!(holder.methods.iter().any(|method| method.name == "make"));

    let factory = elements
        .iter()
        .filter_map(|element| element.as_member())
        .find(|member| member.name == "create")
        .unwrap();
    assert_eq!(
        factory.signature(),
        "public static app.Person.Maker create()"
    );
}

#[test]
fn declared_constructor_and_factory_are_respected() {
    let model = person(AnnotationModel::new("lombok.Builder"))
        .with_method(
            MethodModel::constructor("Person")
                .with_parameter("name", JavaType::string())
                .with_parameter("age", JavaType::int()),
        )
        .with_method(MethodModel::method("builder", JavaType::reference("Object")));
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();

    assert!(registry.augment(&tree, class, ElementKind::Constructor).is_empty());
    assert!(registry.augment(&tree, class, ElementKind::Method).is_empty());
    assert_eq!(registry.augment(&tree, class, ElementKind::Class).len(), 1);
}

#[test]
fn declared_holder_class_is_used_as_return_type() {
    let model = ClassModel::new("Box")
        .in_package("util")
        .with_type_parameter("T")
        .annotated(AnnotationModel::new("lombok.experimental.Builder"))
        .with_field(FieldModel::new("value", JavaType::type_variable("T")))
        .with_inner_class(ClassModel::new("BoxBuilder").with_type_parameter("T"));
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();

    assert!(registry.augment(&tree, class, ElementKind::Class).is_empty());
    let factory = registry.augment(&tree, class, ElementKind::Method);
    assert_eq!(
        factory[0].as_member().unwrap().signature(),
        "public static <T> util.Box.BoxBuilder<T> builder()"
    );
}

#[test]
fn factory_without_holder_is_skipped() {
    // only the factory processor: the holder class never shows up
    let mut registry = ProcessorRegistry::empty(AugmentConfig::default());
    registry.register_class(Box::new(BuilderProcessor));
    let (tree, class) = lower(person(AnnotationModel::new("lombok.Builder")));

    let kinds: Vec<ElementKind> = registry
        .process(&tree, class)
        .iter()
        .map(|element| element.kind())
        .collect();
    assert_eq!(kinds, vec![ElementKind::Constructor]);
}

#[test]
fn builder_on_interface_is_reported_once() {
    let model = person(AnnotationModel::new("lombok.Builder")).with_kind(ClassKind::Interface);
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();

    assert!(registry.process(&tree, class).is_empty());
    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].is_error());
    assert_eq!(problems[0].message, "'@Builder' is only supported on a class type");
}

#[test]
fn invalid_names_are_errors() {
    let annotation = AnnotationModel::new("lombok.Builder")
        .with("builderMethodName", AnnotationValue::string("2fast"));
    let (tree, class) = lower(person(annotation));
    let registry = ProcessorRegistry::new();

    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "'builderMethodName' must be a valid Java identifier, got '2fast'"
    );
    assert!(registry.process(&tree, class).is_empty());
}

#[test]
fn builder_switch_turns_off_both_processors() {
    let config = AugmentConfig::from_toml_str("[processors]\nbuilder = false\n").unwrap();
    let (tree, class) = lower(person(AnnotationModel::new("lombok.Builder")));
    assert!(
        ProcessorRegistry::with_config(config)
            .process(&tree, class)
            .is_empty()
    );
}

#[test]
fn all_args_constructor_is_not_generated_twice() {
    let model = person(AnnotationModel::new("lombok.Builder"))
        .annotated(AnnotationModel::new("lombok.AllArgsConstructor"));
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();

    let constructors = registry.augment(&tree, class, ElementKind::Constructor);
    assert_eq!(constructors.len(), 1);
    assert_eq!(
        constructors[0].as_member().unwrap().signature(),
        "public Person(final java.lang.String name, final int age)"
    );
    assert_eq!(registry.augment(&tree, class, ElementKind::Method).len(), 1);

    let static_name = person(AnnotationModel::new("lombok.Builder")).annotated(
        AnnotationModel::new("lombok.AllArgsConstructor")
            .with("staticName", AnnotationValue::string("of")),
    );
    let (tree, class) = lower(static_name);
    let constructors = registry.augment(&tree, class, ElementKind::Constructor);
    assert_eq!(constructors.len(), 1);
    assert!(constructors[0].as_member().unwrap().signature().starts_with("private Person("));
}
