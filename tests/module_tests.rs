use watgen::gen::{self, FunctionBuilder, Module, Role, Signature, Slot};
use watgen::{FormatOptions, WatError};

fn add_function() -> FunctionBuilder {
    FunctionBuilder::new("$add")
        .unwrap()
        .param(gen::i32())
        .param(gen::i32())
        .declare(Slot::Index(2), gen::i32().as_role(Role::Local))
        .result(gen::i32())
        .body(|b| {
            b.get(0).get(1);
            b.i32().add();
            Ok(())
        })
}

#[test]
fn add_function_renders_declarations_before_instructions() {
    assert_eq!(
        add_function().render().unwrap().to_string(),
        "(func \"$add\" (param i32) (param i32) (local i32) (result i32) get_local 0 get_local 1 i32.add)"
    );
}

#[test]
fn named_local_carries_its_name() {
    let fun = FunctionBuilder::new("$add")
        .unwrap()
        .param(gen::i32())
        .local("lhs", gen::i32())
        .result(gen::i32());

    assert_eq!(
        fun.render().unwrap().to_string(),
        "(func \"$add\" (param i32) (local lhs i32) (result i32))"
    );
}

#[test]
fn import_console_log() {
    let mut module = Module::new();
    module
        .import("console.log", "$log", Signature::new().param(gen::i32()))
        .unwrap();

    let tree = module.render().unwrap();
    assert_eq!(
        tree.children()[0].to_string(),
        "(import \"console\" \"log\" (func \"$log\" (param i32)))"
    );
}

#[test]
fn export_emits_body_then_export_entry() {
    let mut module = Module::new();
    module.export("add", add_function()).unwrap();

    let tree = module.render().unwrap();
    let nodes = tree.children();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].tag(), Some("func"));
    assert_eq!(nodes[1].to_string(), "(export \"add\" (func \"$add\"))");
}

#[test]
fn whole_module_layout() {
    let mut module = Module::new();
    module
        .import("console.log", "$log", Signature::new().param(gen::i32()))
        .unwrap()
        .export("add", add_function())
        .unwrap();

    assert_eq!(
        module.to_wat().unwrap(),
        [
            "(module",
            "  (import \"console\" \"log\" (func \"$log\" (param i32)))",
            "  (func \"$add\" (param i32) (param i32) (local i32) (result i32) get_local 0 get_local 1 i32.add)",
            "  (export \"add\" (func \"$add\"))",
            ")",
        ]
        .join("\n")
    );
}

#[test]
fn module_with_only_exports_keeps_one_child_per_line() {
    let mut module = Module::new();
    module.export("add", add_function()).unwrap();

    assert_eq!(
        module.to_wat().unwrap(),
        [
            "(module",
            "  (func \"$add\" (param i32) (param i32) (local i32) (result i32) get_local 0 get_local 1 i32.add)",
            "  (export \"add\" (func \"$add\"))",
            ")",
        ]
        .join("\n")
    );
}

#[test]
fn params_after_explicit_slots_do_not_overwrite_them() {
    let fun = FunctionBuilder::new("$f")
        .unwrap()
        .declare(Slot::Index(1), gen::i32())
        .param(gen::i64());

    assert_eq!(
        fun.render().unwrap().to_string(),
        "(func \"$f\" (param i32) (param i64))"
    );
}

#[test]
fn custom_indentation() {
    let mut module = Module::new();
    module
        .import("console.log", "$log", Signature::new().param(gen::i32()))
        .unwrap();

    let options = FormatOptions {
        indent: 4,
        ..FormatOptions::default()
    };
    assert_eq!(
        module.to_wat_with(&options).unwrap(),
        "(module\n    (import \"console\" \"log\" (func \"$log\" (param i32)))\n)"
    );
}

#[test]
fn rendering_twice_does_not_accumulate() {
    let fun = add_function();
    let first = fun.render().unwrap();
    let second = fun.render().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.children().len(), 1 + 4 + 3);
}

#[test]
fn failed_export_leaves_table_unchanged() {
    let mut module = Module::new();
    module.export("add", add_function()).unwrap();
    let before = module.to_wat().unwrap();

    let err = module
        .export("add", Signature::new().param(gen::i32()))
        .unwrap_err();

    assert_eq!(err, WatError::TypeMismatch { found: "signature" });
    assert_eq!(module.to_wat().unwrap(), before);
}

#[test]
fn errors_inside_body_surface_from_render() {
    let fun = FunctionBuilder::new("$f").unwrap().body(|b| {
        b.get(0);
        b.f32().div("q")?;
        Ok(())
    });

    assert!(matches!(
        fun.render(),
        Err(WatError::InvalidOperand { op: "div", .. })
    ));
}

#[test]
fn call_and_globals() {
    let fun = FunctionBuilder::new("$main").unwrap().body(|b| {
        b.gget(0).call("$log").i64().const_(1);
        b.gset(1);
        Ok(())
    });

    assert_eq!(
        fun.render().unwrap().to_string(),
        "(func \"$main\" get_global 0 call $log i64.const 1 set_global 1)"
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        gen::i32().store(Some(32)).unwrap_err().to_string(),
        "bit width 32 of `i32.store` exceeds the supported maximum of 16"
    );
    assert_eq!(
        gen::f32().rem("s").unwrap_err().to_string(),
        "`rem` is not supported for `f32`"
    );
    assert_eq!(
        FunctionBuilder::new("").unwrap_err().to_string(),
        "invalid argument `name`: function name must not be empty"
    );
}
