use vfinfo_reader::{
    basic_type::BasicType, class_file::ClassFile, class_file_field::ClassFileField,
    field_flags::FieldFlags,
};
use vfinfo_vm::{
    class::ClassId,
    class_manager::ClassManager,
    class_resolver_by_id::ClassByIdResolver,
    metaspace_closure::{MetaspaceClosure, MetaspacePointers, ReferenceCollector},
    virtual_field_info::VirtualFieldInfo,
};

fn field(flags: FieldFlags, name: &str, descriptor: &str) -> ClassFileField {
    ClassFileField::new(flags, name, descriptor).expect("valid descriptor")
}

fn load_point(classes: &mut ClassManager) -> ClassId {
    classes
        .load_class(ClassFile::new("String", None, vec![]))
        .expect("should load String");
    classes
        .load_class(ClassFile::new(
            "Point",
            None,
            vec![
                field(FieldFlags::PRIVATE, "x", "I"),
                field(FieldFlags::PRIVATE | FieldFlags::SYNTHETIC, "label", "LString;"),
                field(FieldFlags::PRIVATE | FieldFlags::SYNTHETIC, "y", "J"),
            ],
        ))
        .expect("should load Point")
}

#[test_log::test]
fn prints_virtual_fields_of_loaded_class() {
    let mut classes = ClassManager::default();
    let point = load_point(&mut classes);
    let class = classes.find_class_by_id(point).expect("Point is loaded");

    let mut out = String::new();
    VirtualFieldInfo::print_all(&class.virtual_fields, &classes, &mut out).unwrap();
    assert_eq!(
        "Virtual field [0]\n\
         \x20 holder: Point\n\
         \x20 local index: 1\n\
         \x20 offset: 16\n\
         \x20 type: object\n\
         \x20 type_klass: String\n\
         \x20 ------------------\n\
         Virtual field [1]\n\
         \x20 holder: Point\n\
         \x20 local index: 2\n\
         \x20 offset: 24\n\
         \x20 type: long\n\
         \x20 ------------------\n",
        out
    );
}

#[test_log::test]
fn collector_sees_holder_and_type_klass_of_every_virtual_field() {
    let mut classes = ClassManager::default();
    let point = load_point(&mut classes);
    let string = classes.find_class_by_name("String").unwrap().id;

    // Records are owned by their class, so work on a copy of the array
    let mut virtual_fields = classes
        .find_class_by_id(point)
        .unwrap()
        .virtual_fields
        .clone();
    let mut collector = ReferenceCollector::default();
    virtual_fields.metaspace_pointers_do(&mut collector);

    assert_eq!(&[point, string, point], collector.references());
}

struct CountingClosure {
    slots: usize,
}

impl MetaspaceClosure for CountingClosure {
    fn push(&mut self, _slot: &mut Option<ClassId>) {
        self.slots += 1;
    }
}

#[test]
fn every_record_pushes_exactly_two_slots() {
    let mut classes = ClassManager::default();
    let point = load_point(&mut classes);
    let mut virtual_fields = classes
        .find_class_by_id(point)
        .unwrap()
        .virtual_fields
        .clone();

    let mut closure = CountingClosure { slots: 0 };
    virtual_fields.metaspace_pointers_do(&mut closure);
    assert_eq!(2 * virtual_fields.len(), closure.slots);
}

#[test_log::test]
fn unloading_keeps_printed_output_consistent() {
    let mut classes = ClassManager::default();
    classes
        .load_class(ClassFile::new("Unused", None, vec![]))
        .unwrap();
    let point = load_point(&mut classes);

    let mut before = String::new();
    let class = classes.find_class_by_id(point).unwrap();
    VirtualFieldInfo::print_all(&class.virtual_fields, &classes, &mut before).unwrap();

    classes.unload_unreachable(&[point]);

    let class = classes.find_class_by_name("Point").unwrap();
    assert_eq!(BasicType::Object, class.virtual_fields.at(0).basic_type());
    let mut after = String::new();
    VirtualFieldInfo::print_all(&class.virtual_fields, &classes, &mut after).unwrap();
    assert_eq!(before, after);
}
