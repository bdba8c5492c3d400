//! Reachability walk and address assignment.

use quill_ir::TypeDef;
use quill_stack::guarded;
use smallvec::SmallVec;

use super::{id_from_len, TypeCache};
use crate::{Condition, SymbolStore, TemplateId, TypeAddress, TypeHandleId, TypeResult};

impl TypeCache {
    /// Mark a type reachable and give it an address.
    ///
    /// Supertypes are touched first, so a supertype's address is never above
    /// its subtype's. Arguments are touched next. Touching a concrete type
    /// marks its base symbol reachable in `symbols`. Idempotent.
    pub fn touch_type(&mut self, symbols: &mut dyn SymbolStore, id: TypeHandleId) -> TypeAddress {
        guarded(|| {
            if let Some(address) = self.handle(id).address() {
                return address;
            }

            if let Some(supertype) = self.handle(id).supertype() {
                self.touch_type(symbols, supertype);
            }
            let arguments: SmallVec<[TypeHandleId; 4]> =
                SmallVec::from_slice(self.handle(id).arguments());
            for argument in arguments {
                self.touch_type(symbols, argument);
            }

            // Touching the arguments may have reached this type again.
            if let Some(address) = self.handle(id).address() {
                return address;
            }

            let address = TypeAddress::from_raw(id_from_len(self.addressed.len()));
            self.handles[id.index()].assign_address(address);
            self.addressed.push(id);
            if let Some(symbol) = self.handle(id).type_symbol().cloned() {
                symbols.mark_reachable(&symbol);
            }
            tracing::trace!(%address, type_def = %self.type_def(id), "addressed type");
            address
        })
    }

    /// [`touch_type`](Self::touch_type) by description.
    pub fn touch_type_def(
        &mut self,
        symbols: &mut dyn SymbolStore,
        type_def: &TypeDef,
    ) -> TypeResult<TypeAddress> {
        match self.get_type(type_def) {
            Some(id) => Ok(self.touch_type(symbols, id)),
            None => Err(self.report(Condition::missing_type(type_def))),
        }
    }

    /// Touch a template's placeholders and the types bounding them.
    pub fn touch_template(&mut self, symbols: &mut dyn SymbolStore, template: TemplateId) {
        let placeholders = self.template(template).placeholder_handles().to_vec();
        for placeholder in placeholders {
            self.touch_type(symbols, placeholder);
        }

        let bounds: Vec<TypeDef> = self
            .template(template)
            .parameters()
            .iter()
            .filter_map(|p| p.bound_type.clone())
            .collect();
        for bound in bounds {
            let Some(id) = self.get_type(&bound) else {
                crate::invariant!(
                    "bound {bound} of template {} was never interned",
                    self.template(template).url()
                );
            };
            self.touch_type(symbols, id);
        }
    }
}
