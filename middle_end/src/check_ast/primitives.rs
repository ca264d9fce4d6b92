use front_end::ast::NodeHandle;
use front_end::primitive::PrimitiveTag;
use tracing::debug;

use super::{AstChecker, InternalError};

/// When a primitive may legally appear in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    /// Syntactic sugar the parser rewrites away
    ParseOnly,
    /// Placeholder that resolution rewrites away
    PreResolutionOnly,
    Always,
}

/// Classify a primitive. The match has no wildcard arm: a tag added to
/// [`PrimitiveTag`] does not compile until it is classified here.
pub fn classify(tag: PrimitiveTag) -> Legality {
    use PrimitiveTag::*;

    match tag {
        ActualsList => Legality::ParseOnly,

        Init => Legality::PreResolutionOnly,

        Unknown | Noop | Move | RefToString | Return | Yield |

        // arithmetic and logic
        UnaryMinus | UnaryPlus | UnaryNot | UnaryLnot | Add | Subtract | Mult | Div | Mod |
        Lsh | Rsh | Equal | NotEqual | LessOrEqual | GreaterOrEqual | Less | Greater | And |
        Or | Xor | Pow | AddAssign | SubtractAssign | MultAssign | DivAssign | ModAssign |
        LshAssign | RshAssign | AndAssign | OrAssign | XorAssign | Min | Max |

        // class ids, unions and members
        SetCid | TestCid | GetCid | SetUnionId | GetUnionId | GetMember | GetMemberValue |
        SetMember | CheckNil | New | GetReal | GetImag | Query | AddrOf | Deref | LocalCheck |

        // sync and single variables
        SyncInit | SyncDestroy | SyncLock | SyncUnlock | SyncWaitFull | SyncWaitEmpty |
        SyncSignalFull | SyncSignalEmpty | SingleInit | SingleDestroy | SingleLock |
        SingleUnlock | SingleWaitFull | SingleSignalFull | WriteEf | WriteFf | WriteXf |
        SyncReset | ReadFe | ReadFf | ReadXx | SyncIsFull | SingleWriteEf | SingleReset |
        SingleReadFf | SingleReadXx | SingleIsFull |

        // tasking
        GetEndCount | SetEndCount | ProcessTaskList | ExecuteTasksInList | FreeTaskList |
        GetSerial | SetSerial |

        // memory
        Sizeof | TaskAlloc | TaskRealloc | TaskFree | MemhookFree | Alloc | Free | InitFields |
        PtrEqual | PtrNotEqual |

        // types and casts
        IsSubtype | Cast | DynamicCast | Typeof | GetIteratorReturn | Use | UsedModulesList |
        TupleExpand | TupleAndExpand |

        // communication layer
        CommGet | CommPut | CommGetStrd | CommPutStrd |

        // arrays
        ArrayAlloc | ArrayFree | ArrayFreeElts | ArrayGet | ArrayGetValue |
        ArrayShiftBasePointer | ArraySet | ArraySetFirst |

        // compile-time diagnostics
        Error | Warning | When | TypeToString |

        // block info markers
        BlockParamLoop | BlockWhileDoLoop | BlockDoWhileLoop | BlockForLoop | BlockBegin |
        BlockCobegin | BlockCoforall | BlockXmtPragmaForallIInN | BlockXmtPragmaNoalias |
        BlockOn | BlockOnNb | BlockLocal | BlockUnlocal |

        // iteration, deletion and garbage collection
        ToLeader | ToFollower | Delete | GcCcInit | GcAddRoot | GcAddNullRoot | GcDeleteRoot |
        GcCleanup | CallDestructor | LogicalFolder |

        // locales and wide pointers
        WideGetLocale | WideGetNode | WideGetAddr | IsHere | OnLocaleNum | TaskSetLocaleId |
        TaskGetLocaleId | TaskSetHerePtr | TaskGetHerePtr | AllocGvr | HeapRegisterGlobalVar |
        HeapBroadcastGlobalVars | PrivateBroadcast |

        // runtime errors and miscellany
        IntError | CaptureFn | CreateFnType | StringCopy | StringNormalize | CastToVoidStar |
        RtError | RtWarning | NewPrivClass | NumPrivClasses | GetPrivClass | NextUint32 |
        GetUserLine | GetUserFile | FtableCall |

        // tuple and type introspection
        IsStarTupleType | SetSvecMember | GetSvecMember | GetSvecMemberValue | VmtCall |
        NumFields | FieldNumToName | FieldValueByNum | FieldIdByNum | FieldValueByName |
        IsUnionType | EnumMinBits | EnumIsSigned => Legality::Always,
    }
}

impl AstChecker<'_> {
    /// Primitives appear only in phases where they still mean something
    pub fn check_primitives(&self) -> Result<(), InternalError> {
        let phase = &self.ctx.phase;
        let calls = self.ctx.registry.calls();
        debug!(calls = calls.len(), phase = ?phase.current(), "checking primitive legality");

        for &call_id in calls {
            let call = self
                .ast
                .call(call_id)
                .ok_or(InternalError::DanglingNode(NodeHandle::CallExpr(call_id)))?;

            let Some(tag) = call.primitive() else {
                continue;
            };

            match classify(tag) {
                Legality::ParseOnly if phase.is_parsed() => {
                    return Err(InternalError::PrimitiveAfterParse { call: call_id, tag });
                }
                Legality::PreResolutionOnly if phase.is_resolved() => {
                    return Err(InternalError::PrimitiveAfterResolution { call: call_id, tag });
                }
                Legality::ParseOnly | Legality::PreResolutionOnly | Legality::Always => {}
            }
        }

        Ok(())
    }
}
