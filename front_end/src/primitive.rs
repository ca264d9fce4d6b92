//! Primitive operation vocabulary
//!
//! Primitives are compiler-internal operations that a call node can invoke in
//! place of a user routine. The set is closed: passes can only emit tags listed
//! here, and anything that dispatches on a tag is expected to match every
//! variant explicitly so that growing the vocabulary breaks the build until
//! each consumer has been taught about the new tag.

use std::fmt;

macro_rules! primitive_tags {
    ($($(#[$attr:meta])* $variant:ident => $name:literal,)*) => {
        /// Identity of a compiler-internal operation
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PrimitiveTag {
            $($(#[$attr])* $variant,)*
        }

        impl PrimitiveTag {
            /// Every tag, in declaration order
            pub const ALL: &'static [PrimitiveTag] = &[$(PrimitiveTag::$variant,)*];

            /// Name used in `__primitive("...")` calls and in diagnostics
            pub fn name(self) -> &'static str {
                match self {
                    $(PrimitiveTag::$variant => $name,)*
                }
            }
        }
    };
}

primitive_tags! {
    Unknown => "unknown",
    /// Argument list placeholder produced by the parser
    ActualsList => "actuals_list",
    Noop => "noop",
    Move => "move",
    /// Default-initialization placeholder rewritten during resolution
    Init => "init",
    RefToString => "ref_to_string",
    Return => "return",
    Yield => "yield",

    // arithmetic and logic
    UnaryMinus => "u-",
    UnaryPlus => "u+",
    UnaryNot => "u~",
    UnaryLnot => "!",
    Add => "+",
    Subtract => "-",
    Mult => "*",
    Div => "/",
    Mod => "%",
    Lsh => "<<",
    Rsh => ">>",
    Equal => "==",
    NotEqual => "!=",
    LessOrEqual => "<=",
    GreaterOrEqual => ">=",
    Less => "<",
    Greater => ">",
    And => "&",
    Or => "|",
    Xor => "^",
    Pow => "**",
    AddAssign => "+=",
    SubtractAssign => "-=",
    MultAssign => "*=",
    DivAssign => "/=",
    ModAssign => "%=",
    LshAssign => "<<=",
    RshAssign => ">>=",
    AndAssign => "&=",
    OrAssign => "|=",
    XorAssign => "^=",
    Min => "_min",
    Max => "_max",

    // class ids, unions and members
    SetCid => "setcid",
    TestCid => "testcid",
    GetCid => "getcid",
    SetUnionId => "set_union_id",
    GetUnionId => "get_union_id",
    GetMember => "get_member",
    GetMemberValue => "get_member_value",
    SetMember => "set_member",
    CheckNil => "_check_nil",
    New => "new",
    GetReal => "complex_get_real",
    GetImag => "complex_get_imag",
    Query => "query",
    AddrOf => "addr_of",
    Deref => "deref",
    LocalCheck => "_local_check",

    // sync and single variables
    SyncInit => "sync_init",
    SyncDestroy => "sync_destroy",
    SyncLock => "sync_lock",
    SyncUnlock => "sync_unlock",
    SyncWaitFull => "sync_wait_full",
    SyncWaitEmpty => "sync_wait_empty",
    SyncSignalFull => "sync_signal_full",
    SyncSignalEmpty => "sync_signal_empty",
    SingleInit => "single_init",
    SingleDestroy => "single_destroy",
    SingleLock => "single_lock",
    SingleUnlock => "single_unlock",
    SingleWaitFull => "single_wait_full",
    SingleSignalFull => "single_signal_full",
    WriteEf => "write_EF",
    WriteFf => "write_FF",
    WriteXf => "write_XF",
    SyncReset => "sync_reset",
    ReadFe => "read_FE",
    ReadFf => "read_FF",
    ReadXx => "read_XX",
    SyncIsFull => "sync_is_full",
    SingleWriteEf => "single_write_EF",
    SingleReset => "single_reset",
    SingleReadFf => "single_read_FF",
    SingleReadXx => "single_read_XX",
    SingleIsFull => "single_is_full",

    // tasking
    GetEndCount => "get_end_count",
    SetEndCount => "set_end_count",
    ProcessTaskList => "process_task_list",
    ExecuteTasksInList => "execute_tasks_in_list",
    FreeTaskList => "free_task_list",
    GetSerial => "task_get_serial",
    SetSerial => "task_set_serial",

    // memory
    Sizeof => "sizeof",
    TaskAlloc => "task_alloc",
    TaskRealloc => "task_realloc",
    TaskFree => "task_free",
    MemhookFree => "memhook_free",
    Alloc => "alloc",
    Free => "free",
    InitFields => "init_fields",
    PtrEqual => "ptr_eq",
    PtrNotEqual => "ptr_neq",

    // types and casts
    IsSubtype => "is_subtype",
    Cast => "cast",
    DynamicCast => "dynamic_cast",
    Typeof => "typeof",
    GetIteratorReturn => "get_iterator_return",
    Use => "use",
    UsedModulesList => "used_modules_list",
    TupleExpand => "expand_tuple",
    TupleAndExpand => "and_expand_tuple",

    // communication layer
    CommGet => "comm_get",
    CommPut => "comm_put",
    CommGetStrd => "comm_get_strd",
    CommPutStrd => "comm_put_strd",

    // arrays
    ArrayAlloc => "array_alloc",
    ArrayFree => "array_free",
    ArrayFreeElts => "array_free_elts",
    ArrayGet => "array_get",
    ArrayGetValue => "array_get_value",
    ArrayShiftBasePointer => "shift_base_pointer",
    ArraySet => "array_set",
    ArraySetFirst => "array_set_first",

    // compile-time diagnostics
    Error => "error",
    Warning => "warning",
    When => "when case expressions",
    TypeToString => "typeToString",

    // block info markers
    BlockParamLoop => "param loop",
    BlockWhileDoLoop => "while...do loop",
    BlockDoWhileLoop => "do...while loop",
    BlockForLoop => "for loop",
    BlockBegin => "begin block",
    BlockCobegin => "cobegin block",
    BlockCoforall => "coforall loop",
    BlockXmtPragmaForallIInN => "xmt pragma forall i in n",
    BlockXmtPragmaNoalias => "noalias pragma",
    BlockOn => "on block",
    BlockOnNb => "non-blocking on block",
    BlockLocal => "local block",
    BlockUnlocal => "unlocal local block",

    // iteration, deletion and garbage collection
    ToLeader => "to leader",
    ToFollower => "to follower",
    Delete => "delete",
    GcCcInit => "gc_cc_init",
    GcAddRoot => "gc_add_root",
    GcAddNullRoot => "gc_add_null_root",
    GcDeleteRoot => "gc_delete_root",
    GcCleanup => "gc_cleanup",
    CallDestructor => "call_destructor",
    LogicalFolder => "_paramFoldLogical",

    // locales and wide pointers
    WideGetLocale => "_wide_get_locale",
    WideGetNode => "_wide_get_node",
    WideGetAddr => "_wide_get_addr",
    IsHere => "is_here",
    OnLocaleNum => "chpl_on_locale_num",
    TaskSetLocaleId => "task_setLocaleID",
    TaskGetLocaleId => "task_getLocaleID",
    TaskSetHerePtr => "task_setHerePtr",
    TaskGetHerePtr => "task_getHerePtr",
    AllocGvr => "allocate_global_vars_registry",
    HeapRegisterGlobalVar => "_heap_register_global_var",
    HeapBroadcastGlobalVars => "_heap_broadcast_global_vars",
    PrivateBroadcast => "_private_broadcast",

    // runtime errors and miscellany
    IntError => "_internal_error",
    CaptureFn => "capture fn",
    CreateFnType => "create fn type",
    StringCopy => "string_copy",
    StringNormalize => "string_normalize",
    CastToVoidStar => "cast_to_void_star",
    RtError => "chpl_error",
    RtWarning => "chpl_warning",
    NewPrivClass => "chpl_newPrivatizedClass",
    NumPrivClasses => "chpl_numPrivatizedClasses",
    GetPrivClass => "chpl_getPrivatizedClass",
    NextUint32 => "_next_uint32",
    GetUserLine => "_get_user_line",
    GetUserFile => "_get_user_file",
    FtableCall => "call ftable function",

    // tuple and type introspection
    IsStarTupleType => "is star tuple type",
    SetSvecMember => "set svec member",
    GetSvecMember => "get svec member",
    GetSvecMemberValue => "get svec member value",
    VmtCall => "virtual method call",
    NumFields => "num fields",
    FieldNumToName => "field num to name",
    FieldValueByNum => "field value by num",
    FieldIdByNum => "field id by num",
    FieldValueByName => "field value by name",
    IsUnionType => "is union type",
    EnumMinBits => "enum min bits",
    EnumIsSigned => "enum is signed",
}

impl fmt::Display for PrimitiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (\"{}\")", self, self.name())
    }
}
